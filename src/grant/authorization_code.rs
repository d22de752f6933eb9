use iref::UriBuf;
use serde::{Deserialize, Serialize};

use crate::CodeBuf;

/// Access token request of the Authorization Code Grant.
///
/// `redirect_uri` must be identical to the one sent with the authorization
/// request.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "grant_type", rename = "authorization_code")]
pub struct AuthorizationCodeTokenRequest {
	pub code: CodeBuf,

	pub redirect_uri: UriBuf,
}

impl AuthorizationCodeTokenRequest {
	pub fn new(code: CodeBuf, redirect_uri: UriBuf) -> Self {
		Self { code, redirect_uri }
	}
}
