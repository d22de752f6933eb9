use crate::{client::OAuth2ClientError, transport::HttpClient};

impl HttpClient for reqwest::Client {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		log::debug!("{} {}", request.method(), request.uri());
		log::trace!("HTTP request: {request:?}");

		let response = self
			.execute(request.try_into().map_err(OAuth2ClientError::request)?)
			.await
			.map_err(OAuth2ClientError::request)?;

		let response = into_http_response(response).await?;
		log::trace!("HTTP response: {response:?}");

		Ok(response)
	}
}

async fn into_http_response(
	response: reqwest::Response,
) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
	let mut builder = http::Response::builder().status(response.status());

	#[cfg(not(target_arch = "wasm32"))]
	{
		builder = builder.version(response.version());
	}

	if let Some(headers) = builder.headers_mut() {
		headers.extend(
			response
				.headers()
				.iter()
				.map(|(name, value)| (name.clone(), value.clone())),
		);
	}

	let body = response
		.bytes()
		.await
		.map_err(OAuth2ClientError::response)?;

	builder
		.body(body.to_vec())
		.map_err(OAuth2ClientError::response)
}
