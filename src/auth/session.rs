//! Mutable session state: credentials, the current user code, and the access token.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AppId, AppSecret, UserCode},
	error::ConfigError,
};

/// Base URL used when the caller does not configure one.
pub const DEFAULT_BASE_URL: &str = "https://clef.io/api/v1";

/// Credential and token holder backing every outbound call.
///
/// All credential fields start unset; operations that need them validate before
/// any network I/O. The access token is written back by a successful authorize
/// exchange and persists for the lifetime of the session.
#[derive(Clone)]
pub struct Session {
	base_url: Url,
	app_id: Option<AppId>,
	app_secret: Option<AppSecret>,
	user_code: Option<UserCode>,
	access_token: Option<AccessToken>,
}
impl Session {
	/// Creates a session pointed at [`DEFAULT_BASE_URL`] with no credentials set.
	pub fn new() -> Self {
		Self {
			base_url: Url::parse(DEFAULT_BASE_URL)
				.expect("Hard-coded default base URL is always valid."),
			app_id: None,
			app_secret: None,
			user_code: None,
			access_token: None,
		}
	}

	/// Replaces the base URL after validating it is a well-formed absolute URL.
	///
	/// A valid absolute URL is accepted unchanged; anything else fails with a
	/// validation error before it can reach the transport.
	pub fn set_base_url(&mut self, url: impl AsRef<str>) -> Result<&mut Self, ConfigError> {
		let raw = url.as_ref();
		let parsed = Url::parse(raw)
			.map_err(|e| ConfigError::InvalidBaseUrl { input: raw.to_owned(), source: e })?;

		if parsed.cannot_be_a_base() {
			return Err(ConfigError::OpaqueBaseUrl { input: raw.to_owned() });
		}

		self.base_url = parsed;

		Ok(self)
	}

	/// Builder-style [`set_base_url`](Self::set_base_url).
	pub fn with_base_url(mut self, url: impl AsRef<str>) -> Result<Self, ConfigError> {
		self.set_base_url(url)?;

		Ok(self)
	}

	/// Sets the application ID.
	pub fn with_app_id(mut self, app_id: AppId) -> Self {
		self.app_id = Some(app_id);

		self
	}

	/// Sets the application secret.
	pub fn with_app_secret(mut self, app_secret: AppSecret) -> Self {
		self.app_secret = Some(app_secret);

		self
	}

	/// Sets the user code to exchange on the next authorize call.
	pub fn with_user_code(mut self, user_code: UserCode) -> Self {
		self.user_code = Some(user_code);

		self
	}

	/// Replaces the stored user code.
	pub fn set_user_code(&mut self, user_code: UserCode) -> &mut Self {
		self.user_code = Some(user_code);

		self
	}

	/// Replaces the stored access token.
	pub fn set_access_token(&mut self, token: AccessToken) -> &mut Self {
		self.access_token = Some(token);

		self
	}

	/// Drops the stored access token, forcing the next generic call to re-authenticate.
	pub fn clear_access_token(&mut self) -> &mut Self {
		self.access_token = None;

		self
	}

	/// Configured base URL.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Configured application ID, if any.
	pub fn app_id(&self) -> Option<&AppId> {
		self.app_id.as_ref()
	}

	/// Configured application secret, if any.
	pub fn app_secret(&self) -> Option<&AppSecret> {
		self.app_secret.as_ref()
	}

	/// Stored user code, if any.
	pub fn user_code(&self) -> Option<&UserCode> {
		self.user_code.as_ref()
	}

	/// Stored access token, if any.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.access_token.as_ref()
	}

	/// Builds an endpoint URL by appending `segments` to the base path.
	///
	/// Appends rather than joins, so a versioned base like `/api/v1` keeps its
	/// path prefix.
	pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ConfigError> {
		let mut url = self.base_url.clone();

		{
			let mut path = url
				.path_segments_mut()
				.map_err(|()| ConfigError::OpaqueBaseUrl { input: self.base_url.to_string() })?;

			path.pop_if_empty();
			path.extend(segments);
		}

		Ok(url)
	}
}
impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("base_url", &self.base_url.as_str())
			.field("app_id", &self.app_id)
			.field("app_secret_set", &self.app_secret.is_some())
			.field("user_code", &self.user_code)
			.field("access_token_set", &self.access_token.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn default_base_url_is_the_public_api() {
		assert_eq!(Session::new().base_url().as_str(), "https://clef.io/api/v1");
	}

	#[test]
	fn base_url_rejects_relative_and_malformed_input() {
		let mut session = Session::new();

		assert!(matches!(
			session.set_base_url("not a url"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			session.set_base_url("/api/v1"),
			Err(ConfigError::InvalidBaseUrl { .. })
		));
		assert!(matches!(
			session.set_base_url("mailto:ops@example.com"),
			Err(ConfigError::OpaqueBaseUrl { .. })
		));
		// Failed updates must leave the previous value untouched.
		assert_eq!(session.base_url().as_str(), "https://clef.io/api/v1");
	}

	#[test]
	fn base_url_accepts_absolute_urls_unchanged() {
		let session = Session::new()
			.with_base_url("https://staging.clef.io/api/v1")
			.expect("Absolute URL should be accepted.");

		assert_eq!(session.base_url().as_str(), "https://staging.clef.io/api/v1");
	}

	#[test]
	fn endpoints_extend_the_versioned_base_path() {
		let session = Session::new();
		let url = session.endpoint(&["authorize"]).expect("Endpoint should build.");

		assert_eq!(url.as_str(), "https://clef.io/api/v1/authorize");

		let session = session
			.with_base_url("https://clef.io/api/v1/")
			.expect("Trailing-slash base should be accepted.");
		let url = session.endpoint(&["info"]).expect("Endpoint should build.");

		assert_eq!(url.as_str(), "https://clef.io/api/v1/info");
	}

	#[test]
	fn debug_output_redacts_secret_material() {
		let session = Session::new()
			.with_app_id(AppId::new("app-123").expect("Application fixture should be valid."))
			.with_app_secret(AppSecret::new("sekret"));
		let rendered = format!("{session:?}");

		assert!(rendered.contains("app_secret_set: true"));
		assert!(!rendered.contains("sekret"));
	}
}
