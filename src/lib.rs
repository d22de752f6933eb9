//! Client side of the [OAuth 2.0 Authorization Framework][rfc6749].
//!
//! This crate drives the authorization round-trip of an OAuth 2.0 client:
//!
//! - building the authorization request URI, with a random `state` value
//!   protecting the redirection against CSRF;
//! - verifying the URI the user-agent is redirected back to;
//! - exchanging an authorization code or a refresh token at the token
//!   endpoint ([Authorization Code Grant][code], [Implicit Grant][implicit]);
//! - validating and normalizing the token endpoint response;
//! - attaching the resulting [bearer token][rfc6750] to resource requests.
//!
//! # Modules
//!
//! - [`client`]: client configuration, session state and error types.
//! - [`endpoints`]: authorization request, redirection response and token
//!   endpoint.
//! - [`grant`]: token request parameters for each grant type.
//! - [`server`]: error responses returned by the authorization server.
//! - [`token`]: the token held by the client.
//! - [`transport`]: HTTP transport and content type handling.
//! - [`util`]: URI query string utilities.
//!
//! Core OAuth 2.0 types ([`AccessToken`], [`ClientId`], [`Code`], [`Scope`],
//! [`State`], etc.) are re-exported at the crate root.
//!
//! [rfc6749]: https://datatracker.ietf.org/doc/html/rfc6749
//! [rfc6750]: https://datatracker.ietf.org/doc/html/rfc6750
//! [code]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.1
//! [implicit]: https://datatracker.ietf.org/doc/html/rfc6749#section-4.2
#[cfg(feature = "reqwest")]
pub use reqwest;

pub use http;

pub mod client;
pub mod endpoints;
pub mod grant;
pub mod server;
pub mod token;
pub mod transport;
mod types;
pub mod util;

pub use client::{OAuth2ClientError, OAuth2Config, ProtocolError};
pub use token::{Token, TokenType};
pub use types::*;
