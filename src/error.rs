//! Client-level error types shared across the session, transport, and store layers.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token-store failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Local configuration or validation problem, raised before any network I/O.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Call-name registry failure.
	#[error(transparent)]
	Dispatch(#[from] crate::dispatch::DispatchError),

	/// Service answered with a non-success HTTP status.
	#[error("Service returned HTTP status {status}.")]
	Endpoint {
		/// Status code reported by the service.
		status: u16,
	},
}

/// Validation failures raised synchronously before a request is dispatched.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No HTTP transport has been attached to the client.
	#[error("HTTP transport has not been configured.")]
	MissingHttpClient,
	/// The application ID is required but unset.
	#[error("Application ID has not been set.")]
	MissingAppId,
	/// The application secret is required but unset.
	#[error("Application secret has not been set.")]
	MissingAppSecret,
	/// No user code was supplied or stored for the authorize exchange.
	#[error("User code is required for the authorize exchange.")]
	MissingUserCode,
	/// The base URL is not a well-formed absolute URL.
	#[error("Base URL `{input}` is invalid.")]
	InvalidBaseUrl {
		/// Rejected input string.
		input: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The base URL parses but cannot carry path segments (e.g. `mailto:`).
	#[error("Base URL `{input}` cannot carry endpoint paths.")]
	OpaqueBaseUrl {
		/// Rejected input string.
		input: String,
	},
	/// Identifier validation failed.
	#[error(transparent)]
	InvalidIdentifier(#[from] crate::auth::IdentifierError),
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the service.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the service.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
