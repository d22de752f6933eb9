//! Scripted in-memory transport for tests.
use std::{cell::RefCell, collections::VecDeque};

use http::{StatusCode, header};

use crate::{client::OAuth2ClientError, transport::HttpClient};

/// Replays queued responses in order and records every request it receives.
#[derive(Default)]
pub struct MockHttpClient {
	responses: RefCell<VecDeque<Result<http::Response<Vec<u8>>, OAuth2ClientError>>>,
	requests: RefCell<Vec<http::Request<Vec<u8>>>>,
}

impl MockHttpClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_json(self, status: StatusCode, body: &str) -> Self {
		let response = http::Response::builder()
			.status(status)
			.header(header::CONTENT_TYPE, "application/json;charset=UTF-8")
			.body(body.as_bytes().to_vec())
			.unwrap();
		self.with_response(response)
	}

	pub fn with_response(self, response: http::Response<Vec<u8>>) -> Self {
		self.responses.borrow_mut().push_back(Ok(response));
		self
	}

	pub fn with_error(self, error: OAuth2ClientError) -> Self {
		self.responses.borrow_mut().push_back(Err(error));
		self
	}

	pub fn requests(&self) -> std::cell::Ref<'_, Vec<http::Request<Vec<u8>>>> {
		self.requests.borrow()
	}

	pub fn last_request(&self) -> std::cell::Ref<'_, http::Request<Vec<u8>>> {
		std::cell::Ref::map(self.requests.borrow(), |requests| {
			requests.last().expect("no request was sent")
		})
	}
}

impl HttpClient for MockHttpClient {
	async fn send(
		&self,
		request: http::Request<Vec<u8>>,
	) -> Result<http::Response<Vec<u8>>, OAuth2ClientError> {
		self.requests.borrow_mut().push(request);
		self.responses
			.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| Err(OAuth2ClientError::request("no response queued")))
	}
}
