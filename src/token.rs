//! Access token issued by the authorization server.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
	AccessToken, AccessTokenBuf, RefreshToken, RefreshTokenBuf, Scope, client::ProtocolError,
};

/// Type of the issued access token.
///
/// Only bearer tokens are supported.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6750>
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TokenType {
	#[default]
	#[serde(rename = "bearer")]
	Bearer,
}

impl TokenType {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Bearer => "bearer",
		}
	}

	/// Parses a `token_type` value. The comparison is case-insensitive.
	pub fn parse(value: &str) -> Option<Self> {
		value.eq_ignore_ascii_case("bearer").then_some(Self::Bearer)
	}
}

impl fmt::Display for TokenType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Access token, as held by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
	access_token: AccessTokenBuf,

	#[serde(default)]
	token_type: TokenType,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	refresh_token: Option<RefreshTokenBuf>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	expires_in: Option<i64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	scope: Option<String>,

	#[serde(default, skip_serializing_if = "Map::is_empty")]
	extra: Map<String, Value>,
}

impl Token {
	/// Creates a bearer token with no refresh token, scope or expiration.
	pub fn new(access_token: AccessTokenBuf) -> Self {
		Self {
			access_token,
			token_type: TokenType::Bearer,
			refresh_token: None,
			expires_in: None,
			scope: None,
			extra: Map::new(),
		}
	}

	pub fn with_refresh_token(self, refresh_token: Option<RefreshTokenBuf>) -> Self {
		Self {
			refresh_token,
			..self
		}
	}

	pub fn with_expires_in(self, expires_in: Option<i64>) -> Self {
		Self { expires_in, ..self }
	}

	pub fn with_scope(self, scope: Option<String>) -> Self {
		Self { scope, ..self }
	}

	pub fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	pub fn token_type(&self) -> TokenType {
		self.token_type
	}

	pub fn refresh_token(&self) -> Option<&RefreshToken> {
		self.refresh_token.as_deref()
	}

	/// Lifetime of the access token in seconds, counted from when the
	/// response was generated.
	///
	/// `None` means the expiration is undefined.
	pub fn expires_in(&self) -> Option<i64> {
		self.expires_in
	}

	/// Scope granted by the authorization server, or the requested scope if
	/// the server did not say.
	///
	/// The server's value is kept verbatim, even when it does not follow the
	/// `scope` grammar (an empty string, stray spaces).
	pub fn scope(&self) -> Option<&str> {
		self.scope.as_deref()
	}

	/// Granted scope as a validated [`Scope`], if it is one.
	pub fn granted_scope(&self) -> Option<&Scope> {
		self.scope.as_deref().and_then(|scope| Scope::new(scope).ok())
	}

	/// Members of the token response not defined by RFC 6749.
	pub fn extra(&self) -> &Map<String, Value> {
		&self.extra
	}

	/// Validates and normalizes a token endpoint response.
	///
	/// Absent optional members take defaults: the bearer token type, an
	/// undefined expiration, `requested_scope`, and `previous_refresh_token`
	/// so a refresh response without a new refresh token keeps the old one.
	/// A `null` member counts as absent.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-5.1>
	pub fn parse(
		json: &Value,
		requested_scope: Option<&Scope>,
		previous_refresh_token: Option<&RefreshToken>,
	) -> Result<Self, ProtocolError> {
		let response = || json.to_string();
		let invalid = |field: &'static str| ProtocolError::InvalidField {
			field,
			response: response(),
		};

		let Some(object) = json.as_object() else {
			return Err(ProtocolError::MissingAccessToken {
				response: response(),
			});
		};

		let member = |name: &str| object.get(name).filter(|value| !value.is_null());

		let access_token = member("access_token").ok_or_else(|| {
			ProtocolError::MissingAccessToken {
				response: response(),
			}
		})?;
		let access_token = access_token
			.as_str()
			.and_then(|value| AccessTokenBuf::new(value.to_owned()).ok())
			.ok_or_else(|| invalid("access_token"))?;

		let token_type = match member("token_type") {
			// Some servers omit this required member.
			None => TokenType::Bearer,
			Some(value) => {
				let value = value.as_str().ok_or_else(|| invalid("token_type"))?;
				TokenType::parse(value).ok_or_else(|| ProtocolError::UnsupportedTokenType {
					token_type: value.to_owned(),
					response: response(),
				})?
			}
		};

		let refresh_token = match member("refresh_token") {
			None => previous_refresh_token.map(ToOwned::to_owned),
			Some(value) => Some(
				value
					.as_str()
					.and_then(|value| RefreshTokenBuf::new(value.to_owned()).ok())
					.ok_or_else(|| invalid("refresh_token"))?,
			),
		};

		let expires_in = match member("expires_in") {
			None => None,
			Some(value) => Some(as_integer(value).ok_or_else(|| invalid("expires_in"))?),
		};

		// The granted scope may differ from the requested one.
		let scope = match member("scope") {
			None => requested_scope.map(|scope| scope.as_str().to_owned()),
			Some(value) => Some(value.as_str().ok_or_else(|| invalid("scope"))?.to_owned()),
		};

		let extra = object
			.iter()
			.filter(|(name, _)| !is_token_member(name))
			.map(|(name, value)| (name.clone(), value.clone()))
			.collect();

		Ok(Self {
			access_token,
			token_type,
			refresh_token,
			expires_in,
			scope,
			extra,
		})
	}
}

/// Reads an integer, accepting floats with no fractional part (`3600.0`).
fn as_integer(value: &Value) -> Option<i64> {
	value.as_i64().or_else(|| {
		value
			.as_f64()
			.filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
			.map(|f| f as i64)
	})
}

fn is_token_member(name: &str) -> bool {
	matches!(
		name,
		"access_token" | "token_type" | "refresh_token" | "expires_in" | "scope"
	)
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn requested() -> Option<&'static Scope> {
		Some(Scope::new("read write").unwrap())
	}

	#[test]
	fn full_response() {
		let token = Token::parse(
			&json!({
				"access_token": "abc",
				"token_type": "Bearer",
				"expires_in": 3600,
				"refresh_token": "r1",
				"scope": "read"
			}),
			requested(),
			None,
		)
		.unwrap();

		assert_eq!(token.access_token().as_str(), "abc");
		assert_eq!(token.token_type(), TokenType::Bearer);
		assert_eq!(token.expires_in(), Some(3600));
		assert_eq!(token.refresh_token().unwrap().as_str(), "r1");
		assert_eq!(token.scope().unwrap(), "read");
		assert!(token.extra().is_empty());
	}

	#[test]
	fn omitted_members_take_defaults() {
		let token = Token::parse(&json!({ "access_token": "abc" }), requested(), None).unwrap();

		assert_eq!(token.token_type(), TokenType::Bearer);
		assert_eq!(token.expires_in(), None);
		assert_eq!(token.scope().unwrap(), "read write");
		assert!(token.refresh_token().is_none());
	}

	#[test]
	fn no_scope_requested_or_granted() {
		let token = Token::parse(&json!({ "access_token": "abc" }), None, None).unwrap();
		assert!(token.scope().is_none());
	}

	#[test]
	fn granted_scope_is_kept_verbatim() {
		for scope in ["", "read ", "read  write"] {
			let token = Token::parse(
				&json!({ "access_token": "abc", "scope": scope }),
				requested(),
				None,
			)
			.unwrap();

			assert_eq!(token.scope(), Some(scope));
			assert!(token.granted_scope().is_none());
		}

		let token = Token::parse(
			&json!({ "access_token": "abc", "scope": "read" }),
			requested(),
			None,
		)
		.unwrap();
		assert_eq!(token.granted_scope().unwrap().iter().count(), 1);
	}

	#[test]
	fn refresh_token_is_kept_when_omitted() {
		let previous = RefreshToken::new("r1").unwrap();
		let token = Token::parse(
			&json!({ "access_token": "xyz", "token_type": "bearer" }),
			None,
			Some(previous),
		)
		.unwrap();

		assert_eq!(token.access_token().as_str(), "xyz");
		assert_eq!(token.refresh_token().unwrap().as_str(), "r1");
	}

	#[test]
	fn refresh_token_is_replaced_when_present() {
		let previous = RefreshToken::new("r1").unwrap();
		let token = Token::parse(
			&json!({ "access_token": "xyz", "refresh_token": "r2" }),
			None,
			Some(previous),
		)
		.unwrap();

		assert_eq!(token.refresh_token().unwrap().as_str(), "r2");
	}

	#[test]
	fn unsupported_token_type() {
		let error = Token::parse(
			&json!({ "access_token": "abc", "token_type": "mac" }),
			None,
			None,
		)
		.unwrap_err();

		match error {
			ProtocolError::UnsupportedTokenType { token_type, .. } => assert_eq!(token_type, "mac"),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn token_type_is_case_insensitive() {
		for token_type in ["bearer", "Bearer", "BEARER", "bEaReR"] {
			let token = Token::parse(
				&json!({ "access_token": "abc", "token_type": token_type }),
				None,
				None,
			)
			.unwrap();
			assert_eq!(token.token_type(), TokenType::Bearer);
		}
	}

	#[test]
	fn missing_access_token() {
		let error = Token::parse(&json!({ "token_type": "bearer" }), None, None).unwrap_err();

		match &error {
			ProtocolError::MissingAccessToken { response } => {
				assert_eq!(response, r#"{"token_type":"bearer"}"#)
			}
			other => panic!("unexpected error: {other}"),
		}
		assert!(error.to_string().contains("token_type"));
	}

	#[test]
	fn non_object_response() {
		assert!(matches!(
			Token::parse(&json!(["abc"]), None, None),
			Err(ProtocolError::MissingAccessToken { .. })
		));
	}

	#[test]
	fn wrongly_typed_members() {
		let cases = [
			(json!({ "access_token": 42 }), "access_token"),
			(json!({ "access_token": "" }), "access_token"),
			(json!({ "access_token": "abc", "token_type": 1 }), "token_type"),
			(json!({ "access_token": "abc", "expires_in": "3600" }), "expires_in"),
			(json!({ "access_token": "abc", "expires_in": 1.5 }), "expires_in"),
			(json!({ "access_token": "abc", "refresh_token": false }), "refresh_token"),
			(json!({ "access_token": "abc", "scope": ["read"] }), "scope"),
		];

		for (json, expected) in cases {
			match Token::parse(&json, None, None) {
				Err(ProtocolError::InvalidField { field, .. }) => assert_eq!(field, expected),
				other => panic!("unexpected result for {json}: {other:?}"),
			}
		}
	}

	#[test]
	fn null_members_are_absent() {
		let previous = RefreshToken::new("r1").unwrap();
		let token = Token::parse(
			&json!({
				"access_token": "abc",
				"token_type": null,
				"expires_in": null,
				"refresh_token": null,
				"scope": null
			}),
			requested(),
			Some(previous),
		)
		.unwrap();

		assert_eq!(token.expires_in(), None);
		assert_eq!(token.refresh_token().unwrap().as_str(), "r1");
		assert_eq!(token.scope().unwrap(), "read write");
	}

	#[test]
	fn integral_float_expiration() {
		let token = Token::parse(
			&json!({ "access_token": "abc", "expires_in": 3600.0 }),
			None,
			None,
		)
		.unwrap();
		assert_eq!(token.expires_in(), Some(3600));
	}

	#[test]
	fn negative_expiration_is_kept() {
		let token = Token::parse(
			&json!({ "access_token": "abc", "expires_in": -1 }),
			None,
			None,
		)
		.unwrap();
		assert_eq!(token.expires_in(), Some(-1));
	}

	#[test]
	fn extension_members_are_kept() {
		let token = Token::parse(
			&json!({ "access_token": "abc", "id_token": "eyJ...", "example_parameter": "example_value" }),
			None,
			None,
		)
		.unwrap();

		assert_eq!(token.extra().len(), 2);
		assert_eq!(token.extra()["example_parameter"], "example_value");
	}

	#[test]
	fn narrowed_scope_is_not_an_error() {
		let token = Token::parse(
			&json!({ "access_token": "abc", "scope": "write" }),
			requested(),
			None,
		)
		.unwrap();
		assert_eq!(token.scope().unwrap(), "write");
	}
}
