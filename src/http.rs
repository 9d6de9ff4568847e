//! Transport primitives for API calls.
//!
//! The module exposes [`HttpTransport`] as the client's only dependency on an HTTP
//! stack. The client resolves endpoints, bodies, and query strings into an
//! [`ApiRequest`], and implementations execute it exactly once—no retries, no
//! timeouts, no redirect handling. Failures surface as transport errors; every
//! reachable response, success or not, comes back as an [`ApiResponse`].

// std
use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")]
use reqwest::header::{CONTENT_TYPE, HeaderValue};
// self
use crate::{_prelude::*, error::TransportError};

/// HTTP method for an outbound call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`; query-string parameters only.
	Get,
	/// `POST`; carries a form or JSON body.
	Post,
}
impl Method {
	/// Returns the wire-format method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Body payload attached to an [`ApiRequest`].
#[derive(Clone, Debug)]
pub enum RequestBody {
	/// No body.
	Empty,
	/// `application/x-www-form-urlencoded` key/value pairs.
	Form(Vec<(String, String)>),
	/// `application/json` payload.
	Json(Value),
}

/// Fully resolved outbound request handed to the transport.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute URL including any query parameters.
	pub url: Url,
	/// Payload to send.
	pub body: RequestBody,
}
impl ApiRequest {
	/// Builds a bodyless `GET` request.
	pub fn get(url: Url) -> Self {
		Self { method: Method::Get, url, body: RequestBody::Empty }
	}

	/// Builds a form-encoded `POST` request.
	pub fn post_form(url: Url, pairs: Vec<(String, String)>) -> Self {
		Self { method: Method::Post, url, body: RequestBody::Form(pairs) }
	}

	/// Builds a JSON `POST` request.
	pub fn post_json(url: Url, payload: Value) -> Self {
		Self { method: Method::Post, url, body: RequestBody::Json(payload) }
	}
}

/// Raw response surfaced by a transport.
#[derive(Clone, Debug)]
pub struct ApiResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// True for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Future type returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of carrying API calls.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back a
/// client for its whole lifetime, and the returned futures must be `Send` so callers
/// can drive them from any executor. Tests provide stub transports that never touch
/// the network.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Executes a single request.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Form bodies are encoded with `url::form_urlencoded` and JSON bodies with
/// `serde_json`, with the matching `content-type` set on each request.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let builder = match request.method {
				Method::Get => client.get(request.url),
				Method::Post => client.post(request.url),
			};
			let builder = match request.body {
				RequestBody::Empty => builder,
				RequestBody::Form(pairs) => {
					let encoded = url::form_urlencoded::Serializer::new(String::new())
						.extend_pairs(pairs)
						.finish();

					builder
						.header(
							CONTENT_TYPE,
							HeaderValue::from_static("application/x-www-form-urlencoded"),
						)
						.body(encoded)
				},
				RequestBody::Json(payload) => builder
					.header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
					.body(payload.to_string()),
			};
			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(ApiResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::Value;
	use url::Url;
	// self
	use super::*;

	#[test]
	fn success_covers_the_2xx_range() {
		assert!(ApiResponse { status: 200, body: Vec::new() }.is_success());
		assert!(ApiResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 199, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 302, body: Vec::new() }.is_success());
		assert!(!ApiResponse { status: 500, body: Vec::new() }.is_success());
	}

	#[test]
	fn request_builders_pick_the_matching_method() {
		let url = Url::parse("https://clef.io/api/v1/info").expect("Fixture URL should parse.");

		assert_eq!(ApiRequest::get(url.clone()).method, Method::Get);
		assert_eq!(ApiRequest::post_form(url.clone(), Vec::new()).method, Method::Post);
		assert!(matches!(
			ApiRequest::post_json(url, Value::Null).body,
			RequestBody::Json(Value::Null)
		));
	}
}
