//! Client for the Clef authentication API—exchange login codes for access tokens, fetch user
//! profiles, and sign legacy API calls with pluggable transports and token persistence.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod obs;
pub mod sign;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AppId, AppSecret, Session},
		client::ApiClient,
		http::ReqwestTransport,
	};

	/// Client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = ApiClient<ReqwestTransport>;

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Constructs an [`ApiClient`] pointed at `base_url` with the provided application
	/// credentials and the insecure reqwest transport used across integration tests.
	pub fn build_reqwest_test_client(
		base_url: &str,
		app_id: &str,
		app_secret: &str,
	) -> ReqwestTestClient {
		let session = Session::new()
			.with_base_url(base_url)
			.expect("Test base URL should be a valid absolute URL.")
			.with_app_id(AppId::new(app_id).expect("Test application ID should be valid."))
			.with_app_secret(AppSecret::new(app_secret));

		ApiClient::with_transport(session, test_reqwest_transport())
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use time::OffsetDateTime;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))]
use {clef_client as _, color_eyre as _, httpmock as _, tempfile as _};
