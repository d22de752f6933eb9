//! Authorization server endpoints, as seen from the client.
//!
//! - [`authorization`]: authorization request URI construction.
//! - [`redirect`]: validation of the redirection URI the user-agent comes
//!   back with.
//! - [`token`]: token endpoint requests.
use crate::{client::OAuth2ClientError, transport::HttpClient};

pub mod authorization;
pub mod redirect;
pub mod token;

/// A request sent to endpoint `E` over an [`HttpClient`].
pub trait HttpRequest<E> {
	type Response;

	fn build_request(&self, endpoint: &E) -> Result<http::Request<Vec<u8>>, OAuth2ClientError>;

	fn decode_response(
		&self,
		endpoint: &E,
		response: http::Response<Vec<u8>>,
	) -> Result<Self::Response, OAuth2ClientError>;

	/// Builds the request, sends it and decodes the response.
	///
	/// Decoding only runs once the transport returned a response. Transport
	/// errors are returned unchanged.
	#[allow(async_fn_in_trait)]
	async fn send(
		&self,
		endpoint: &E,
		http_client: &impl HttpClient,
	) -> Result<Self::Response, OAuth2ClientError> {
		let request = self.build_request(endpoint)?;
		let response = http_client.send(request).await?;
		self.decode_response(endpoint, response)
	}
}
