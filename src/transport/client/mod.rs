use crate::client::OAuth2ClientError;

#[cfg(feature = "reqwest")]
mod reqwest;

/// Asynchronous HTTP transport used to reach the token endpoint.
///
/// Connection failures, timeouts and cancellation are the implementor's
/// concern. Errors are returned to the caller unchanged.
pub trait HttpClient {
	#[allow(async_fn_in_trait)]
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError>;
}

impl<T> HttpClient for &T
where
	T: HttpClient,
{
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		T::send(*self, request).await
	}
}
