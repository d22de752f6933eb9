use iref::{Uri, UriBuf};
use serde::{Deserialize, Serialize};

use crate::{
	ClientId, ClientIdBuf, ClientSecret, Code, IntoScope, Scope, ScopeBuf, State, StateBuf,
	client::{OAuth2Client, OAuth2ClientError, ProtocolError},
	endpoints::{
		authorization::{AuthorizationRequest, ResponseType},
		redirect::{AuthorizationResponse, RedirectResponse},
		token::TokenEndpoint,
	},
	grant::{authorization_code::AuthorizationCodeTokenRequest, refresh::RefreshTokenRequest},
	token::Token,
	transport::HttpClient,
	util::form_encode,
};

fn default_true() -> bool {
	true
}

fn default_access_token_key() -> String {
	"access_token".to_owned()
}

/// OAuth 2.0 client configuration and session.
///
/// Holds the registered client credentials and authorization server
/// endpoints, plus the state of one authorization round-trip: the pending
/// `state` value and the current token.
///
/// Only one authorization round-trip may be in flight per instance. Use one
/// instance per user session.
///
/// # Example
///
/// ```ignore
/// let mut config = OAuth2Config::new(
///     client_id,
///     ClientSecret::new("secret"),
///     uri!("https://server.example.com/authorize").to_owned(),
///     uri!("https://server.example.com/token").to_owned(),
///     uri!("https://client.example.com/cb").to_owned(),
/// )
/// .with_scope(scope);
///
/// let url = config.build_authorization_uri(true);
/// // ... user-agent is redirected, then comes back to `redirected` ...
/// config.token_from_redirected_uri(&http_client, &redirected).await?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
	client_id: ClientIdBuf,

	client_secret: ClientSecret,

	auth_endpoint: UriBuf,

	token_endpoint: UriBuf,

	redirect_uri: UriBuf,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	scope: Option<ScopeBuf>,

	#[serde(default)]
	implicit_grant: bool,

	#[serde(default = "default_true")]
	http_basic_auth: bool,

	#[serde(default = "default_true")]
	bearer_auth: bool,

	#[serde(default = "default_access_token_key")]
	access_token_key: String,

	#[serde(skip)]
	state: Option<StateBuf>,

	#[serde(skip)]
	token: Option<Token>,
}

impl OAuth2Config {
	pub fn new(
		client_id: ClientIdBuf,
		client_secret: ClientSecret,
		auth_endpoint: UriBuf,
		token_endpoint: UriBuf,
		redirect_uri: UriBuf,
	) -> Self {
		Self {
			client_id,
			client_secret,
			auth_endpoint,
			token_endpoint,
			redirect_uri,
			scope: None,
			implicit_grant: false,
			http_basic_auth: true,
			bearer_auth: true,
			access_token_key: default_access_token_key(),
			state: None,
			token: None,
		}
	}

	pub fn with_scope(self, scope: impl IntoScope) -> Self {
		Self {
			scope: scope.into_scope(),
			..self
		}
	}

	pub fn with_implicit_grant(self, implicit_grant: bool) -> Self {
		Self {
			implicit_grant,
			..self
		}
	}

	pub fn with_http_basic_auth(self, http_basic_auth: bool) -> Self {
		Self {
			http_basic_auth,
			..self
		}
	}

	/// Selects how [`Self::authorize_request`] attaches the access token:
	/// `Authorization: Bearer` header (`true`) or query parameter (`false`).
	pub fn with_bearer_auth(self, bearer_auth: bool) -> Self {
		Self {
			bearer_auth,
			..self
		}
	}

	/// Name of the query parameter used when bearer authentication is
	/// disabled.
	pub fn with_access_token_key(self, access_token_key: impl Into<String>) -> Self {
		Self {
			access_token_key: access_token_key.into(),
			..self
		}
	}

	pub fn auth_endpoint(&self) -> &Uri {
		&self.auth_endpoint
	}

	pub fn token_endpoint(&self) -> &Uri {
		&self.token_endpoint
	}

	pub fn redirect_uri(&self) -> &Uri {
		&self.redirect_uri
	}

	pub fn scope(&self) -> Option<&Scope> {
		self.scope.as_deref()
	}

	pub fn set_scope(&mut self, scope: impl IntoScope) {
		self.scope = scope.into_scope();
	}

	pub fn implicit_grant(&self) -> bool {
		self.implicit_grant
	}

	pub fn bearer_auth(&self) -> bool {
		self.bearer_auth
	}

	pub fn access_token_key(&self) -> &str {
		&self.access_token_key
	}

	/// Value of the pending authorization request's `state` parameter.
	pub fn state(&self) -> Option<&State> {
		self.state.as_deref()
	}

	/// Replaces the pending `state` value.
	pub fn set_state(&mut self, state: Option<StateBuf>) {
		self.state = state;
	}

	pub fn token(&self) -> Option<&Token> {
		self.token.as_ref()
	}

	pub fn set_token(&mut self, token: Token) {
		self.token = Some(token);
	}

	pub fn clear_token(&mut self) -> Option<Token> {
		self.token.take()
	}

	/// Returns `true` if an access token is available for requests.
	pub fn is_enabled(&self) -> bool {
		self.token.is_some()
	}

	fn response_type(&self) -> ResponseType {
		ResponseType::new(self.implicit_grant)
	}

	/// Builds the authorization request URI the user-agent is sent to.
	///
	/// With `generate_state`, a new random `state` replaces the pending one,
	/// abandoning any round-trip in flight. Without it the pending `state` is
	/// reused so the same URI can be built again; one is generated if none
	/// is pending.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.1>
	pub fn build_authorization_uri(&mut self, generate_state: bool) -> UriBuf {
		let response_type = self.response_type();

		if generate_state {
			self.state = None;
		}
		let state: &State = self.state.get_or_insert_with(StateBuf::new_random);

		let uri = AuthorizationRequest {
			response_type,
			client_id: &self.client_id,
			redirect_uri: self.redirect_uri.as_str(),
			state,
			scope: self.scope.as_deref(),
		}
		.redirect_url(&self.auth_endpoint);

		log::debug!("authorization request URI: {uri}");
		uri
	}

	/// Completes the authorization round-trip from the URI the user-agent
	/// was redirected to.
	///
	/// The `state` parameter must match the pending one; it is consumed on a
	/// match. A `code` is then exchanged at the token endpoint, while an
	/// implicit grant `access_token` is stored as-is without contacting the
	/// token endpoint.
	///
	/// See:
	/// - <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.2>
	/// - <https://datatracker.ietf.org/doc/html/rfc6749#section-4.2.2>
	pub async fn token_from_redirected_uri(
		&mut self,
		http_client: &impl HttpClient,
		redirected_uri: &Uri,
	) -> Result<&Token, OAuth2ClientError> {
		let response = RedirectResponse::from_redirected_uri(redirected_uri, self.response_type());
		let outcome = response.verify(self.state.as_deref())?;
		self.state = None;

		match outcome {
			AuthorizationResponse::Code(code) => self.token_from_code(http_client, &code).await,
			AuthorizationResponse::AccessToken(access_token) => {
				log::debug!("access token received from implicit grant");
				Ok(&*self.token.insert(Token::new(access_token)))
			}
		}
	}

	/// Exchanges an authorization code for a token.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-4.1.3>
	pub async fn token_from_code(
		&mut self,
		http_client: &impl HttpClient,
		code: &Code,
	) -> Result<&Token, OAuth2ClientError> {
		let grant = AuthorizationCodeTokenRequest::new(code.to_owned(), self.redirect_uri.clone());
		self.request_token(http_client, grant).await
	}

	/// Obtains a new token with the current refresh token.
	///
	/// If the response carries no new refresh token, the current one is
	/// kept.
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6749#section-6>
	pub async fn token_from_refresh(
		&mut self,
		http_client: &impl HttpClient,
	) -> Result<&Token, OAuth2ClientError> {
		let refresh_token = self
			.token
			.as_ref()
			.and_then(Token::refresh_token)
			.ok_or(ProtocolError::MissingRefreshToken)?
			.to_owned();

		self.request_token(http_client, RefreshTokenRequest::new(refresh_token))
			.await
	}

	async fn request_token<G: Serialize>(
		&mut self,
		http_client: &impl HttpClient,
		grant: G,
	) -> Result<&Token, OAuth2ClientError> {
		log::debug!("requesting token from {}", self.token_endpoint);

		let json = TokenEndpoint::new(&*self, &self.token_endpoint)
			.begin(grant)
			.with_scope(self.scope.as_deref())
			.send(http_client)
			.await?;

		let token = Token::parse(
			&json,
			self.scope.as_deref(),
			self.token.as_ref().and_then(Token::refresh_token),
		)?;

		Ok(&*self.token.insert(token))
	}

	/// Attaches the current access token to a request for a protected
	/// resource.
	///
	/// With bearer authentication the token goes in the `Authorization`
	/// header, otherwise in the query parameter named by
	/// [`Self::access_token_key`].
	///
	/// See: <https://datatracker.ietf.org/doc/html/rfc6750#section-2>
	pub fn authorize_request<B>(
		&self,
		request: &mut http::Request<B>,
	) -> Result<(), OAuth2ClientError> {
		let token = self.token.as_ref().ok_or(ProtocolError::MissingToken)?;

		if self.bearer_auth {
			let value = token
				.access_token()
				.bearer_header()
				.map_err(OAuth2ClientError::request)?;
			request
				.headers_mut()
				.insert(http::header::AUTHORIZATION, value);
		} else {
			let uri = append_query_parameter(
				request.uri(),
				&self.access_token_key,
				token.access_token().as_str(),
			)?;
			*request.uri_mut() = uri;
		}

		Ok(())
	}
}

impl OAuth2Client for OAuth2Config {
	fn client_id(&self) -> &ClientId {
		&self.client_id
	}

	fn client_secret(&self) -> &ClientSecret {
		&self.client_secret
	}

	fn http_basic_auth(&self) -> bool {
		self.http_basic_auth
	}
}

fn append_query_parameter(
	uri: &http::Uri,
	name: &str,
	value: &str,
) -> Result<http::Uri, OAuth2ClientError> {
	let parameter = format!("{}={}", form_encode(name), form_encode(value));

	let path_and_query = match uri.query() {
		Some(query) if !query.is_empty() => format!("{}?{query}&{parameter}", uri.path()),
		_ => format!("{}?{parameter}", uri.path()),
	};

	let mut parts = uri.clone().into_parts();
	parts.path_and_query = Some(path_and_query.parse().map_err(OAuth2ClientError::request)?);
	http::Uri::from_parts(parts).map_err(OAuth2ClientError::request)
}
