//! High-level signed request sender for the service endpoints.

// self
use crate::{
	_prelude::*,
	auth::{AccessToken, AppId, AppSecret, LogoutToken, Session, UserCode},
	error::ConfigError,
	http::{ApiRequest, ApiResponse, HttpTransport},
	obs::{self, CallKind, CallOutcome, CallSpan},
	sign::Signer,
	store::TokenStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestApiClient = ApiClient<ReqwestTransport>;

/// Decoded `/authorize` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Authorization {
	/// Bearer token granted for the exchanged code, when the service issued one.
	pub access_token: Option<AccessToken>,
	/// Fields the service returned beyond the token itself.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Decoded `/info` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
	/// Service-assigned user identifier.
	pub id: Option<Value>,
	/// Primary e-mail address on the profile.
	pub email: Option<String>,
	/// Given name on the profile.
	pub first_name: Option<String>,
	/// Family name on the profile.
	pub last_name: Option<String>,
	/// Fields the service returned beyond the profile basics.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Decoded `/logout` response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogoutAck {
	/// Whether the service confirmed the logout.
	pub success: Option<bool>,
	/// Fields the service returned beyond the confirmation flag.
	#[serde(flatten)]
	pub extra: BTreeMap<String, Value>,
}

/// Coordinates signed calls against the service endpoints.
///
/// The client owns the [`Session`], the [`Signer`] for the generic call path, an
/// optional transport handle, and an optional token-persistence hook. Operations
/// that can mutate session state take `&mut self`; the client runs one request at
/// a time and is not designed for concurrent use.
pub struct ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Mutable credential/token holder backing each call.
	pub session: Session,
	/// Signature generator for the generic call path.
	pub signer: Signer,
	http_client: Option<Arc<C>>,
	token_store: Option<Arc<dyn TokenStore>>,
}
impl<C> ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	/// Creates a client with no transport attached.
	///
	/// Every operation fails validation until [`set_transport`](Self::set_transport)
	/// provides one; useful when the transport is constructed later than the
	/// credentials.
	pub fn detached(session: Session) -> Self {
		Self { session, signer: Signer::default(), http_client: None, token_store: None }
	}

	/// Creates a client around the caller-provided transport.
	pub fn with_transport(session: Session, transport: impl Into<Arc<C>>) -> Self {
		Self {
			session,
			signer: Signer::default(),
			http_client: Some(transport.into()),
			token_store: None,
		}
	}

	/// Sets or replaces the transport.
	pub fn set_transport(&mut self, transport: impl Into<Arc<C>>) -> &mut Self {
		self.http_client = Some(transport.into());

		self
	}

	/// Sets or replaces the signer used for generic calls.
	pub fn with_signer(mut self, signer: Signer) -> Self {
		self.signer = signer;

		self
	}

	/// Attaches the token-persistence hook.
	///
	/// When the session holds no token yet, any token the hook already stores is
	/// loaded into the session so a restarted process resumes where it left off.
	pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Result<Self> {
		if self.session.access_token().is_none()
			&& let Some(token) = store.load()?
		{
			self.session.set_access_token(token);
		}

		self.token_store = Some(store);

		Ok(self)
	}

	/// Exchanges a user code for an access token via `POST {base}/authorize`.
	///
	/// The explicit `user_code` wins over the session's stored code; with neither
	/// present the call fails validation before any I/O. A decoded response with a
	/// non-null `access_token` stores the token in the session and the attached
	/// token store. A body that does not decode as a JSON object yields `Ok(None)`.
	pub async fn authenticate(
		&mut self,
		user_code: Option<&UserCode>,
	) -> Result<Option<Authorization>> {
		const KIND: CallKind = CallKind::Authorize;

		let span = CallSpan::new(KIND, "authenticate");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.authenticate_inner(user_code)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Fetches the current user's profile via `GET {base}/info`.
	///
	/// The stored access token rides along as a query parameter (empty when none is
	/// held, matching the service's lenient parameter handling). An undecodable
	/// body yields `Ok(None)`.
	pub async fn user_info(&self) -> Result<Option<UserProfile>> {
		const KIND: CallKind = CallKind::UserInfo;

		let span = CallSpan::new(KIND, "user_info");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.user_info_inner()).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Terminates a user session via `POST {base}/logout`.
	///
	/// An undecodable body yields `Ok(None)`. The session's own access token is
	/// left untouched; the logout token names the session to terminate.
	pub async fn logout(&self, logout_token: &LogoutToken) -> Result<Option<LogoutAck>> {
		const KIND: CallKind = CallKind::Logout;

		let span = CallSpan::new(KIND, "logout");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.logout_inner(logout_token)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Generic signed `POST` against the configured base URL.
	///
	/// Validates the transport and application credentials before any I/O and
	/// authenticates first when the session holds no access token. The request
	/// carries `apikey` (the application ID) and `sig` (a fresh signature) query
	/// parameters with `payload` as the JSON body.
	pub async fn send(&mut self, payload: Value) -> Result<Option<Value>> {
		const KIND: CallKind = CallKind::Generic;

		let span = CallSpan::new(KIND, "send");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.send_inner(payload)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	async fn authenticate_inner(
		&mut self,
		user_code: Option<&UserCode>,
	) -> Result<Option<Authorization>> {
		let code = user_code
			.or(self.session.user_code())
			.cloned()
			.ok_or(ConfigError::MissingUserCode)?;
		let (app_id, app_secret) = self.credentials()?;
		let transport = self.transport()?;
		let url = self.session.endpoint(&["authorize"])?;
		let pairs = vec![
			("code".to_owned(), code.to_string()),
			("app_id".to_owned(), app_id.to_string()),
			("app_secret".to_owned(), app_secret.expose().to_owned()),
		];
		let response = transport.execute(ApiRequest::post_form(url, pairs)).await?;
		let authorization: Option<Authorization> = decode_body(&response)?;

		if let Some(token) = authorization.as_ref().and_then(|a| a.access_token.as_ref()) {
			self.session.set_access_token(token.clone());

			if let Some(store) = &self.token_store {
				store.save(token)?;
			}
		}

		Ok(authorization)
	}

	async fn user_info_inner(&self) -> Result<Option<UserProfile>> {
		let transport = self.transport()?;
		let token =
			self.session.access_token().map(|t| t.expose().to_owned()).unwrap_or_default();
		let mut url = self.session.endpoint(&["info"])?;

		url.query_pairs_mut().append_pair("access_token", &token);

		let response = transport.execute(ApiRequest::get(url)).await?;

		decode_body(&response)
	}

	async fn logout_inner(&self, logout_token: &LogoutToken) -> Result<Option<LogoutAck>> {
		let (app_id, app_secret) = self.credentials()?;
		let transport = self.transport()?;
		let url = self.session.endpoint(&["logout"])?;
		let pairs = vec![
			("logout_token".to_owned(), logout_token.to_string()),
			("app_id".to_owned(), app_id.to_string()),
			("app_secret".to_owned(), app_secret.expose().to_owned()),
		];
		let response = transport.execute(ApiRequest::post_form(url, pairs)).await?;

		decode_body(&response)
	}

	async fn send_inner(&mut self, payload: Value) -> Result<Option<Value>> {
		let (app_id, app_secret) = self.credentials()?;
		let transport = self.transport()?;

		if self.session.access_token().is_none() {
			self.authenticate(None).await?;
		}

		let sig = self.signer.sign(&app_id, Some(&app_secret))?;
		let mut url = self.session.base_url().clone();

		url.query_pairs_mut().append_pair("apikey", app_id.as_ref()).append_pair("sig", &sig);

		let response = transport.execute(ApiRequest::post_json(url, payload)).await?;

		decode_body(&response)
	}

	fn transport(&self) -> Result<Arc<C>, ConfigError> {
		self.http_client.clone().ok_or(ConfigError::MissingHttpClient)
	}

	fn credentials(&self) -> Result<(AppId, AppSecret), ConfigError> {
		let app_id = self.session.app_id().cloned().ok_or(ConfigError::MissingAppId)?;
		let app_secret =
			self.session.app_secret().cloned().ok_or(ConfigError::MissingAppSecret)?;

		Ok((app_id, app_secret))
	}

	/// Current access token, if the session holds one.
	pub fn access_token(&self) -> Option<&AccessToken> {
		self.session.access_token()
	}
}
#[cfg(feature = "reqwest")]
impl ApiClient<ReqwestTransport> {
	/// Creates a client backed by a default reqwest transport.
	pub fn new(session: Session) -> Self {
		Self::with_transport(session, ReqwestTransport::default())
	}
}
impl<C> Debug for ApiClient<C>
where
	C: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ApiClient")
			.field("session", &self.session)
			.field("signer", &self.signer)
			.field("transport_set", &self.http_client.is_some())
			.field("token_store_set", &self.token_store.is_some())
			.finish()
	}
}

/// Decodes a response body, mapping undecodable payloads to `None`.
///
/// Non-success statuses are endpoint errors raised before any decoding; a JSON
/// `null` or a body that fails to parse both map to `None`, matching the
/// service's loose contract.
fn decode_body<T>(response: &ApiResponse) -> Result<Option<T>>
where
	T: for<'de> Deserialize<'de>,
{
	if !response.is_success() {
		return Err(Error::Endpoint { status: response.status });
	}

	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	match serde_path_to_error::deserialize::<_, Option<T>>(&mut deserializer) {
		Ok(decoded) => Ok(decoded),
		Err(e) => {
			#[cfg(feature = "tracing")]
			tracing::debug!(path = %e.path(), "Response body did not decode; treating as empty.");
			#[cfg(not(feature = "tracing"))]
			let _ = e;

			Ok(None)
		},
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::Value;
	// self
	use super::*;
	use crate::error::Error;

	fn response(status: u16, body: &str) -> ApiResponse {
		ApiResponse { status, body: body.as_bytes().to_vec() }
	}

	#[test]
	fn decode_maps_null_and_junk_to_none() {
		assert!(
			decode_body::<Authorization>(&response(200, "null"))
				.expect("Null body should decode.")
				.is_none()
		);
		assert!(
			decode_body::<Authorization>(&response(200, "not json"))
				.expect("Junk body should map to None.")
				.is_none()
		);
		assert!(
			decode_body::<Authorization>(&response(200, "\"a string\""))
				.expect("Non-object body should map to None.")
				.is_none()
		);
	}

	#[test]
	fn decode_surfaces_http_failures_before_parsing() {
		let err = decode_body::<Authorization>(&response(503, "{\"access_token\":\"abc\"}"))
			.expect_err("Non-success statuses should be endpoint errors.");

		assert!(matches!(err, Error::Endpoint { status: 503 }));
	}

	#[test]
	fn decode_collects_unknown_fields() {
		let decoded: Authorization =
			decode_body(&response(200, "{\"access_token\":\"abc\",\"clef_id\":42}"))
				.expect("Body should decode.")
				.expect("Body should be present.");

		assert_eq!(decoded.access_token, Some(AccessToken::new("abc")));
		assert_eq!(decoded.extra.get("clef_id"), Some(&Value::from(42)));
	}

	#[test]
	fn decode_accepts_a_null_token_field() {
		let decoded: Authorization = decode_body(&response(200, "{\"access_token\":null}"))
			.expect("Body should decode.")
			.expect("Body should be present.");

		assert_eq!(decoded.access_token, None);
	}
}
