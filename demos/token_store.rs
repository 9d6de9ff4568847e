//! Demonstrates the token-persistence hook: a file-backed store survives client
//! restarts, so a new process resumes with the previously issued token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// std
use std::sync::Arc;
// self
use clef_client::{
	auth::{AppId, AppSecret, Session, UserCode},
	client::ApiClient,
	store::{FileTokenStore, TokenStore},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/authorize");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access\"}");
		})
		.await;

	let dir = std::env::temp_dir().join("clef-client-demo");
	let path = dir.join("token.json");
	let session = || -> Result<Session> {
		Ok(Session::new()
			.with_base_url(server.base_url())?
			.with_app_id(AppId::new("demo-app")?)
			.with_app_secret(AppSecret::new("demo-secret")))
	};
	let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path)?);
	let mut client = ApiClient::new(session()?).with_token_store(store)?;

	client.authenticate(Some(&UserCode::new("demo-code")?)).await?;

	println!(
		"First run stored: {}.",
		client.access_token().map(|t| t.expose()).unwrap_or("<none>")
	);

	// A fresh client over the same store resumes without re-authenticating.
	let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::open(&path)?);
	let resumed = ApiClient::new(session()?).with_token_store(store)?;

	println!(
		"Second run resumed with: {}.",
		resumed.access_token().map(|t| t.expose()).unwrap_or("<none>")
	);

	store_cleanup(&path);

	Ok(())
}

fn store_cleanup(path: &std::path::Path) {
	let _ = std::fs::remove_file(path);
}
