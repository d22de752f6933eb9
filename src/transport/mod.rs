//! HTTP transport layer and content types.
use http::{HeaderMap, HeaderValue, header};

use crate::client::OAuth2ClientError;

mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::*;

/// `Content-Type: application/json` header value.
pub const APPLICATION_JSON: HeaderValue = HeaderValue::from_static("application/json");

/// `Content-Type: application/x-www-form-urlencoded` header value.
pub const APPLICATION_X_WWW_FORM_URLENCODED: HeaderValue =
	HeaderValue::from_static("application/x-www-form-urlencoded");

/// Validates that the response `Content-Type` header matches the expected
/// media type.
///
/// Parameters such as `charset` are ignored.
pub fn expect_content_type(
	headers: &HeaderMap,
	expected_value: &HeaderValue,
) -> ::std::result::Result<(), OAuth2ClientError> {
	let content_type = headers
		.get(header::CONTENT_TYPE)
		.ok_or_else(|| OAuth2ClientError::response("missing content type"))?;

	let media_type = content_type
		.as_bytes()
		.split(|b| *b == b';')
		.next()
		.unwrap_or_default()
		.trim_ascii();

	if media_type.eq_ignore_ascii_case(expected_value.as_bytes()) {
		Ok(())
	} else {
		Err(OAuth2ClientError::response(format!(
			"unexpected content type: {}",
			String::from_utf8_lossy(content_type.as_bytes())
		)))
	}
}
