//! Thread-safe in-memory [`TokenStore`] for local development and tests.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	store::{StoreError, TokenStore},
};

/// Keeps the access token in-process; nothing outlives the program.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore(Arc<RwLock<Option<AccessToken>>>);
impl MemoryTokenStore {
	/// Returns the stored token without going through the trait.
	pub fn snapshot(&self) -> Option<AccessToken> {
		self.0.read().clone()
	}
}
impl TokenStore for MemoryTokenStore {
	fn save(&self, token: &AccessToken) -> Result<(), StoreError> {
		*self.0.write() = Some(token.clone());

		Ok(())
	}

	fn load(&self) -> Result<Option<AccessToken>, StoreError> {
		Ok(self.0.read().clone())
	}

	fn clear(&self) -> Result<(), StoreError> {
		*self.0.write() = None;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn save_load_clear_round_trip() {
		let store = MemoryTokenStore::default();

		assert_eq!(store.load().expect("Empty store should load."), None);

		store.save(&AccessToken::new("abc")).expect("Save should succeed.");

		assert_eq!(store.load().expect("Load should succeed."), Some(AccessToken::new("abc")));
		assert_eq!(store.snapshot(), Some(AccessToken::new("abc")));

		store.clear().expect("Clear should succeed.");

		assert_eq!(store.load().expect("Cleared store should load."), None);
	}

	#[test]
	fn clones_share_the_same_slot() {
		let store = MemoryTokenStore::default();
		let view = store.clone();

		store.save(&AccessToken::new("shared")).expect("Save should succeed.");

		assert_eq!(view.snapshot(), Some(AccessToken::new("shared")));
	}
}
