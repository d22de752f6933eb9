//! OAuth 2.0 client configuration, session and error types.
use crate::{ClientId, ClientSecret, server::ErrorResponse};

mod config;

pub use config::*;

/// Registered client credentials, as seen by the token endpoint.
pub trait OAuth2Client {
	fn client_id(&self) -> &ClientId;

	fn client_secret(&self) -> &ClientSecret;

	/// Whether the credentials are sent with HTTP Basic authentication
	/// (`true`) or as form parameters in the request body (`false`).
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
	fn http_basic_auth(&self) -> bool;
}

/// Violation of the OAuth 2.0 protocol by the redirection URI or the token
/// endpoint response.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
	#[error("no authorization request is pending: build an authorization URI first")]
	NoPendingState,

	#[error("parameter 'state' missing from redirected URI")]
	MissingState,

	#[error("redirected URI parameter 'state'='{received}' does not match state='{expected}'")]
	StateMismatch { expected: String, received: String },

	#[error("either 'code' or 'access_token' parameter must be in the redirected URI")]
	MissingCodeOrAccessToken,

	#[error("authorization server rejected the request: {0}")]
	AuthorizationRejected(ErrorResponse),

	#[error("response json contains no 'access_token': {response}")]
	MissingAccessToken { response: String },

	#[error("only 'token_type=bearer' access tokens are currently supported, got '{token_type}': {response}")]
	UnsupportedTokenType { token_type: String, response: String },

	#[error("invalid '{field}' in token response: {response}")]
	InvalidField {
		field: &'static str,
		response: String,
	},

	#[error("invalid '{field}' in redirected URI")]
	InvalidRedirectParameter { field: &'static str },

	#[error("no refresh token available")]
	MissingRefreshToken,

	#[error("no access token available")]
	MissingToken,
}

#[derive(Debug, thiserror::Error)]
pub enum OAuth2ClientError {
	#[error("unable to send request: {0}")]
	Request(String),

	#[error("unable to receive response: {0}")]
	Response(String),

	#[error("server responded with status code: {0}")]
	ServerError(http::StatusCode),

	#[error("server responded with status code {status}: {response}")]
	Rejected {
		status: http::StatusCode,
		response: ErrorResponse,
	},

	#[error(transparent)]
	Protocol(#[from] ProtocolError),
}

impl OAuth2ClientError {
	pub fn request(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("request error: {msg}");
		Self::Request(msg)
	}

	pub fn response(e: impl ToString) -> Self {
		let msg = e.to_string();
		log::error!("response error: {msg}");
		Self::Response(msg)
	}

	pub fn server(status: http::StatusCode) -> Self {
		log::error!("unexpected server response status: {status}");
		Self::ServerError(status)
	}

	pub fn rejected(status: http::StatusCode, response: ErrorResponse) -> Self {
		log::error!("token request rejected ({status}): {response}");
		Self::Rejected { status, response }
	}

	/// Returns the protocol violation, if this is one.
	pub fn as_protocol(&self) -> Option<&ProtocolError> {
		match self {
			Self::Protocol(e) => Some(e),
			_ => None,
		}
	}
}
