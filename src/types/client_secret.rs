use std::fmt;

use serde::{Deserialize, Serialize};

/// An OAuth 2.0 client secret.
///
/// The value is opaque and never printed by [`Debug`](fmt::Debug).
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);

impl ClientSecret {
	pub fn new(secret: impl Into<String>) -> Self {
		Self(secret.into())
	}

	/// Returns the secret value.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for ClientSecret {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("ClientSecret(***)")
	}
}

impl From<String> for ClientSecret {
	fn from(value: String) -> Self {
		Self(value)
	}
}

impl From<&str> for ClientSecret {
	fn from(value: &str) -> Self {
		Self(value.to_owned())
	}
}
