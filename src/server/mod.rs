//! Error responses sent by the authorization server.
use std::{collections::BTreeMap, fmt};

use iref::UriBuf;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// An OAuth 2.0 error response.
///
/// Returned as query (or fragment) parameters of the redirection URI when an
/// authorization request fails, and as a JSON object when a token request
/// fails.
///
/// See:
/// - <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2.1>
/// - <https://datatracker.ietf.org/doc/html/rfc6749#section-5.2>
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorResponse<T = String> {
	/// A single error code string.
	pub error: T,

	/// Human-readable text providing additional information about the error.
	pub error_description: Option<String>,

	/// A URI identifying a human-readable web page with information about
	/// the error.
	pub error_uri: Option<UriBuf>,
}

impl<T> ErrorResponse<T> {
	pub fn new(error: T, error_description: Option<String>, error_uri: Option<UriBuf>) -> Self {
		Self {
			error,
			error_description,
			error_uri,
		}
	}
}

impl ErrorResponse {
	/// Extracts an error response from decoded redirection URI parameters.
	///
	/// Returns `None` if there is no `error` parameter. An `error_uri` that is
	/// not a valid URI is dropped.
	pub fn from_redirect_params(params: &BTreeMap<String, String>) -> Option<Self> {
		let error = params.get("error")?.clone();
		let error_description = params.get("error_description").cloned();
		let error_uri = params
			.get("error_uri")
			.and_then(|uri| UriBuf::new(uri.clone().into_bytes()).ok());

		Some(Self::new(error, error_description, error_uri))
	}
}

impl<T: fmt::Display> fmt::Display for ErrorResponse<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.error)?;

		if let Some(description) = &self.error_description {
			write!(f, ": {description}")?;
		}

		Ok(())
	}
}
