//! Authorization response carried by the redirection URI.
//!
//! See:
//! - <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2>
//! - <https://datatracker.ietf.org/doc/html/rfc6749#section-4.2.2>
use std::collections::BTreeMap;

use iref::Uri;

use crate::{
	AccessTokenBuf, CodeBuf, State, client::ProtocolError, endpoints::authorization::ResponseType,
	server::ErrorResponse, util::split_query,
};

/// Outcome of a successful authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationResponse {
	/// Authorization code, to be exchanged at the token endpoint.
	Code(CodeBuf),

	/// Access token issued directly by the Implicit Grant.
	AccessToken(AccessTokenBuf),
}

/// Decoded parameters of a redirection URI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectResponse {
	params: BTreeMap<String, String>,
}

impl RedirectResponse {
	/// Decodes the parameters of `uri`.
	///
	/// The Implicit Grant returns its parameters in the fragment, so they
	/// never reach server logs. The Authorization Code Grant uses the query.
	pub fn from_redirected_uri(uri: &Uri, response_type: ResponseType) -> Self {
		let source = match response_type {
			ResponseType::Token => uri.fragment().map(|fragment| fragment.as_str()),
			ResponseType::Code => uri.query().map(|query| query.as_str()),
		};

		Self {
			params: source.map(split_query).unwrap_or_default(),
		}
	}

	pub fn params(&self) -> &BTreeMap<String, String> {
		&self.params
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(String::as_str)
	}

	/// Checks the `state` parameter against the value sent with the
	/// authorization request, then extracts the code or access token.
	///
	/// `expected` is `None` when no authorization request is pending.
	pub fn verify(&self, expected: Option<&State>) -> Result<AuthorizationResponse, ProtocolError> {
		let expected = expected.ok_or(ProtocolError::NoPendingState)?;
		let received = self.get("state").ok_or(ProtocolError::MissingState)?;

		if !expected.matches(received) {
			log::warn!("redirected URI state does not match the pending authorization request");
			return Err(ProtocolError::StateMismatch {
				expected: expected.as_str().to_owned(),
				received: received.to_owned(),
			});
		}

		if let Some(code) = self.get("code") {
			return CodeBuf::new(code.to_owned())
				.map(AuthorizationResponse::Code)
				.map_err(|_| ProtocolError::InvalidRedirectParameter { field: "code" });
		}

		// Only the Implicit Grant returns an access token here, and never
		// with a refresh token.
		if let Some(access_token) = self.get("access_token") {
			return AccessTokenBuf::new(access_token.to_owned())
				.map(AuthorizationResponse::AccessToken)
				.map_err(|_| ProtocolError::InvalidRedirectParameter {
					field: "access_token",
				});
		}

		match ErrorResponse::from_redirect_params(&self.params) {
			Some(error) => Err(ProtocolError::AuthorizationRejected(error)),
			None => Err(ProtocolError::MissingCodeOrAccessToken),
		}
	}
}

#[cfg(test)]
mod tests {
	use iref::uri;

	use super::*;

	fn state() -> &'static State {
		State::new("af0ifjsldkj").unwrap()
	}

	#[test]
	fn code_from_query() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=SplxlOBeZQQYbYS6WxSbIA&state=af0ifjsldkj"),
			ResponseType::Code,
		);

		assert_eq!(
			response.verify(Some(state())).unwrap(),
			AuthorizationResponse::Code(CodeBuf::new("SplxlOBeZQQYbYS6WxSbIA".to_owned()).unwrap())
		);
	}

	#[test]
	fn access_token_from_fragment() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?state=ignored#access_token=2YotnFZFEjr1zCsicMWpAA&state=af0ifjsldkj&token_type=example"),
			ResponseType::Token,
		);

		assert_eq!(
			response.verify(Some(state())).unwrap(),
			AuthorizationResponse::AccessToken(
				AccessTokenBuf::new("2YotnFZFEjr1zCsicMWpAA".to_owned()).unwrap()
			)
		);
	}

	#[test]
	fn implicit_grant_ignores_query() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?access_token=abc&state=af0ifjsldkj"),
			ResponseType::Token,
		);

		assert!(matches!(
			response.verify(Some(state())),
			Err(ProtocolError::MissingState)
		));
	}

	#[test]
	fn missing_state() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=abc"),
			ResponseType::Code,
		);

		assert!(matches!(
			response.verify(Some(state())),
			Err(ProtocolError::MissingState)
		));
	}

	#[test]
	fn state_mismatch_reports_both_values() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=abc&state=forged"),
			ResponseType::Code,
		);

		let error = response.verify(Some(state())).unwrap_err();
		match &error {
			ProtocolError::StateMismatch { expected, received } => {
				assert_eq!(expected, "af0ifjsldkj");
				assert_eq!(received, "forged");
			}
			other => panic!("unexpected error: {other}"),
		}

		let message = error.to_string();
		assert!(message.contains("af0ifjsldkj"));
		assert!(message.contains("forged"));
	}

	#[test]
	fn state_comparison_is_case_sensitive() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=abc&state=AF0IFJSLDKJ"),
			ResponseType::Code,
		);

		assert!(matches!(
			response.verify(Some(state())),
			Err(ProtocolError::StateMismatch { .. })
		));
	}

	#[test]
	fn no_pending_request() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=abc&state=af0ifjsldkj"),
			ResponseType::Code,
		);

		assert!(matches!(
			response.verify(None),
			Err(ProtocolError::NoPendingState)
		));
	}

	#[test]
	fn neither_code_nor_access_token() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?state=af0ifjsldkj"),
			ResponseType::Code,
		);

		assert!(matches!(
			response.verify(Some(state())),
			Err(ProtocolError::MissingCodeOrAccessToken)
		));
	}

	#[test]
	fn authorization_error() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?error=access_denied&error_description=user+said+no&state=af0ifjsldkj"),
			ResponseType::Code,
		);

		match response.verify(Some(state())) {
			Err(ProtocolError::AuthorizationRejected(error)) => {
				assert_eq!(error.error, "access_denied");
				assert_eq!(error.error_description.as_deref(), Some("user said no"));
			}
			other => panic!("unexpected result: {other:?}"),
		}
	}

	#[test]
	fn empty_code_is_rejected() {
		let response = RedirectResponse::from_redirected_uri(
			uri!("https://client.example.com/cb?code=&state=af0ifjsldkj"),
			ResponseType::Code,
		);

		assert!(matches!(
			response.verify(Some(state())),
			Err(ProtocolError::InvalidRedirectParameter { field: "code" })
		));
	}
}
