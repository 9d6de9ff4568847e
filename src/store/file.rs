//! Simple file-backed [`TokenStore`] for CLIs and long-lived bots.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	auth::AccessToken,
	store::{StoreError, TokenStore},
};

/// Persists the access token to a JSON file after each mutation.
///
/// Writes go through a temporary sibling file that is fsynced and renamed into
/// place, so a crash mid-write never leaves a truncated token behind.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
	path: PathBuf,
}
impl FileTokenStore {
	/// Opens a store at the provided path, creating parent directories on demand.
	///
	/// An existing file is validated eagerly so a corrupt token surfaces here
	/// instead of at the first load.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let store = Self { path };

		store.read_token()?;

		Ok(store)
	}

	/// Path the token is persisted at.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}

		Ok(())
	}

	fn read_token(&self) -> Result<Option<AccessToken>, StoreError> {
		let bytes = match fs::read(&self.path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
			Err(e) =>
				return Err(StoreError::Backend {
					message: format!("Failed to read {}: {e}", self.path.display()),
				}),
		};

		if bytes.is_empty() {
			return Ok(None);
		}

		let token = serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
			message: format!("Failed to parse {}: {e}", self.path.display()),
		})?;

		Ok(Some(token))
	}

	fn persist(&self, token: &AccessToken) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let serialized = serde_json::to_vec(token).map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize token: {e}"),
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl TokenStore for FileTokenStore {
	fn save(&self, token: &AccessToken) -> Result<(), StoreError> {
		self.persist(token)
	}

	fn load(&self) -> Result<Option<AccessToken>, StoreError> {
		self.read_token()
	}

	fn clear(&self) -> Result<(), StoreError> {
		match fs::remove_file(&self.path) {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(StoreError::Backend {
				message: format!("Failed to remove {}: {e}", self.path.display()),
			}),
		}
	}
}
