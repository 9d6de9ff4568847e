//! Token persistence hooks and built-in single-token stores.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

// self
use crate::{_prelude::*, auth::AccessToken};

/// Persistence contract for the session access token.
///
/// The client writes through the hook after every successful authorize exchange and
/// can preload the session from it at construction. Callers decide where the token
/// lives by passing an implementation in; there is no ambient storage.
pub trait TokenStore
where
	Self: Send + Sync,
{
	/// Persists or replaces the stored token.
	fn save(&self, token: &AccessToken) -> Result<(), StoreError>;

	/// Fetches the stored token, if present.
	fn load(&self) -> Result<Option<AccessToken>, StoreError>;

	/// Removes the stored token.
	fn clear(&self) -> Result<(), StoreError>;
}

/// Error type produced by [`TokenStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
