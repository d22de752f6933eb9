//! Authorization request.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
use iref::{Uri, UriBuf};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{ClientId, Scope, State, util::extend_uri_query};

/// Value of the `response_type` authorization request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
	/// Authorization Code Grant.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1>
	Code,

	/// Implicit Grant.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.2>
	Token,
}

impl ResponseType {
	pub fn new(implicit_grant: bool) -> Self {
		if implicit_grant { Self::Token } else { Self::Code }
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Code => "code",
			Self::Token => "token",
		}
	}
}

/// Authorization request parameters, in the order they appear in the URI.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationRequest<'a> {
	pub response_type: ResponseType,

	pub client_id: &'a ClientId,

	pub redirect_uri: &'a str,

	pub state: &'a State,

	pub scope: Option<&'a Scope>,
}

impl<'a> AuthorizationRequest<'a> {
	/// Appends the request parameters to the authorization endpoint URI.
	///
	/// Query parameters already present on `endpoint` are kept.
	pub fn redirect_url(&self, endpoint: &Uri) -> UriBuf {
		let mut url = endpoint.to_owned();
		extend_uri_query(&mut url, self);
		url
	}
}

#[cfg(test)]
mod tests {
	use iref::uri;

	use super::*;

	#[test]
	fn response_type_per_grant() {
		assert_eq!(ResponseType::new(false), ResponseType::Code);
		assert_eq!(ResponseType::new(true), ResponseType::Token);
		assert_eq!(ResponseType::Token.as_str(), "token");
	}

	#[test]
	fn parameters_in_order() {
		let request = AuthorizationRequest {
			response_type: ResponseType::Code,
			client_id: ClientId::new("s6BhdRkqt3").unwrap(),
			redirect_uri: "https://client.example.com/cb",
			state: State::new("xyz").unwrap(),
			scope: Some(Scope::new("read write").unwrap()),
		};

		assert_eq!(
			request
				.redirect_url(uri!("https://server.example.com/authorize"))
				.as_str(),
			"https://server.example.com/authorize?response_type=code&client_id=s6BhdRkqt3\
			 &redirect_uri=https%3A%2F%2Fclient.example.com%2Fcb&state=xyz&scope=read+write"
		);
	}

	#[test]
	fn scope_omitted_when_absent() {
		let request = AuthorizationRequest {
			response_type: ResponseType::Token,
			client_id: ClientId::new("s6BhdRkqt3").unwrap(),
			redirect_uri: "https://client.example.com/cb",
			state: State::new("xyz").unwrap(),
			scope: None,
		};

		let url = request.redirect_url(uri!("https://server.example.com/authorize"));
		assert!(url.as_str().contains("response_type=token"));
		assert!(!url.as_str().contains("scope"));
	}
}
