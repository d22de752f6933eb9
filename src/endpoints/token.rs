//! Token endpoint.
//!
//! See: <https://datatracker.ietf.org/doc/html/rfc6749#section-3.2>
use base64::{Engine, prelude::BASE64_STANDARD};
use http::{HeaderValue, header};
use iref::Uri;
use serde::Serialize;

use crate::{
	ClientId, Scope,
	client::{OAuth2Client, OAuth2ClientError},
	endpoints::HttpRequest,
	server::ErrorResponse,
	transport::{APPLICATION_JSON, APPLICATION_X_WWW_FORM_URLENCODED, expect_content_type},
	util::form_encode,
};

pub struct TokenEndpoint<'a, C> {
	pub client: &'a C,
	pub uri: &'a Uri,
}

impl<'a, C> Clone for TokenEndpoint<'a, C> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<'a, C> Copy for TokenEndpoint<'a, C> {}

impl<'a, C> TokenEndpoint<'a, C> {
	pub fn new(client: &'a C, uri: &'a Uri) -> Self {
		Self { client, uri }
	}

	/// Starts a token request carrying the given grant parameters.
	pub fn begin<G>(self, grant: G) -> TokenRequestBuilder<'a, C, G> {
		TokenRequestBuilder::new(self, TokenRequest::new(grant))
	}
}

pub struct TokenRequestBuilder<'a, C, G> {
	pub endpoint: TokenEndpoint<'a, C>,
	pub request: TokenRequest<'a, G>,
}

impl<'a, C, G> TokenRequestBuilder<'a, C, G> {
	pub fn new(endpoint: TokenEndpoint<'a, C>, request: TokenRequest<'a, G>) -> Self {
		Self { endpoint, request }
	}

	/// Requests the given scope, if any.
	pub fn with_scope(mut self, scope: Option<&'a Scope>) -> Self {
		self.request.scope = scope;
		self
	}

	/// Sends the request and returns the JSON token response.
	pub async fn send(
		self,
		http_client: &impl crate::transport::HttpClient,
	) -> Result<serde_json::Value, OAuth2ClientError>
	where
		C: OAuth2Client,
		G: Serialize,
	{
		self.request.send(&self.endpoint, http_client).await
	}
}

/// Token request.
///
/// `G` holds the grant-specific parameters (`grant_type` and friends).
/// Client credentials and the requested scope are added when the HTTP
/// request is built.
#[derive(Debug, Clone)]
pub struct TokenRequest<'a, G> {
	pub grant: G,

	pub scope: Option<&'a Scope>,
}

impl<'a, G> TokenRequest<'a, G> {
	pub fn new(grant: G) -> Self {
		Self { grant, scope: None }
	}
}

/// Client credentials sent in the request body.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
#[derive(Debug, Serialize)]
struct BodyCredentials<'a> {
	client_id: &'a ClientId,
	client_secret: &'a str,
}

#[derive(Serialize)]
struct TokenRequestBody<'a, G> {
	#[serde(flatten)]
	grant: &'a G,

	#[serde(skip_serializing_if = "Option::is_none")]
	scope: Option<&'a Scope>,

	#[serde(flatten)]
	credentials: Option<BodyCredentials<'a>>,
}

/// Computes the `Authorization: Basic` header value for the client.
///
/// Both the identifier and the secret are form-urlencoded before being
/// joined with `:`, so a space becomes `+` rather than `%20`.
///
/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-2.3.1>
pub fn basic_authorization(
	client_id: &ClientId,
	client_secret: &str,
) -> Result<HeaderValue, OAuth2ClientError> {
	let credentials = format!(
		"{}:{}",
		form_encode(client_id.as_str()),
		form_encode(client_secret)
	);

	let mut value =
		HeaderValue::try_from(format!("Basic {}", BASE64_STANDARD.encode(credentials)))
			.map_err(OAuth2ClientError::request)?;
	value.set_sensitive(true);
	Ok(value)
}

impl<'a, G: Serialize> TokenRequest<'a, G> {
	fn encode_body(
		&self,
		credentials: Option<BodyCredentials<'_>>,
	) -> Result<Vec<u8>, OAuth2ClientError> {
		let body = TokenRequestBody {
			grant: &self.grant,
			scope: self.scope,
			credentials,
		};

		log::debug!("serializing {}", std::any::type_name::<G>());
		serde_html_form::to_string(&body)
			.map(String::into_bytes)
			.map_err(OAuth2ClientError::request)
	}
}

impl<'a, 'e, C, G> HttpRequest<TokenEndpoint<'e, C>> for TokenRequest<'a, G>
where
	C: OAuth2Client,
	G: Serialize,
{
	type Response = serde_json::Value;

	fn build_request(
		&self,
		endpoint: &TokenEndpoint<'e, C>,
	) -> Result<http::Request<Vec<u8>>, OAuth2ClientError> {
		let client = endpoint.client;
		let builder = http::Request::builder()
			.method(http::Method::POST)
			.uri(endpoint.uri.as_str())
			.header(header::CONTENT_TYPE, APPLICATION_X_WWW_FORM_URLENCODED)
			.header(header::ACCEPT, APPLICATION_JSON);

		let (builder, body) = if client.http_basic_auth() {
			let authorization =
				basic_authorization(client.client_id(), client.client_secret().expose())?;
			(
				builder.header(header::AUTHORIZATION, authorization),
				self.encode_body(None)?,
			)
		} else {
			let credentials = BodyCredentials {
				client_id: client.client_id(),
				client_secret: client.client_secret().expose(),
			};
			(builder, self.encode_body(Some(credentials))?)
		};

		builder.body(body).map_err(OAuth2ClientError::request)
	}

	fn decode_response(
		&self,
		_endpoint: &TokenEndpoint<'e, C>,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError> {
		let status = response.status();

		if !status.is_success() {
			return Err(
				match serde_json::from_slice::<ErrorResponse>(response.body()) {
					Ok(error) => OAuth2ClientError::rejected(status, error),
					Err(_) => OAuth2ClientError::server(status),
				},
			);
		}

		expect_content_type(response.headers(), &APPLICATION_JSON)?;

		serde_json::from_slice(response.body()).map_err(OAuth2ClientError::response)
	}
}
