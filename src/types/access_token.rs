use http::{HeaderValue, header::InvalidHeaderValue};
use str_newtype::StrNewType;

use super::is_vschar_string;

/// Access Token.
///
/// Opaque credential presented to the protected resource.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-1.4>
///
/// # Grammar
///
/// ```abnf
/// access-token = 1*VSCHAR
/// ```
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, StrNewType)]
#[newtype(
	serde,
	owned(AccessTokenBuf, derive(PartialEq, Eq, PartialOrd, Ord, Hash))
)]
pub struct AccessToken(str);

impl AccessToken {
	pub const fn validate_str(s: &str) -> bool {
		Self::validate_bytes(s.as_bytes())
	}

	pub const fn validate_bytes(bytes: &[u8]) -> bool {
		is_vschar_string(bytes)
	}

	/// Builds the `Authorization: Bearer` header value for this token.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6750#section-2.1>
	pub fn bearer_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
		let mut value = HeaderValue::try_from(format!("Bearer {}", self.as_str()))?;
		value.set_sensitive(true);
		Ok(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn access_token_grammar() {
		assert!(AccessToken::new("2YotnFZFEjr1zCsicMWpAA").is_ok());
		assert!(AccessToken::new("").is_err());
		assert!(AccessToken::new("line\nbreak").is_err());
	}

	#[test]
	fn bearer_header_is_sensitive() {
		let token = AccessToken::new("mF_9.B5f-4.1JqM").unwrap();
		let header = token.bearer_header().unwrap();
		assert_eq!(header, "Bearer mF_9.B5f-4.1JqM");
		assert!(header.is_sensitive());
	}
}
