use serde::{Deserialize, Serialize};

use crate::RefreshTokenBuf;

/// Refresh token request parameters.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-6>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "grant_type", rename = "refresh_token")]
pub struct RefreshTokenRequest {
	pub refresh_token: RefreshTokenBuf,
}

impl RefreshTokenRequest {
	pub fn new(refresh_token: RefreshTokenBuf) -> Self {
		Self { refresh_token }
	}
}
