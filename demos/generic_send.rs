//! Demonstrates the signed generic call path: the client authenticates on demand,
//! then posts a JSON payload with `apikey` + `sig` query parameters attached.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use clef_client::{
	auth::{AppId, AppSecret, Session, UserCode},
	client::ApiClient,
	sign::{SignatureScheme, Signer},
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
	server
		.mock_async(|when, then| {
			when.method(POST).path("/").query_param_exists("sig");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"result\":\"accepted\"}");
		})
		.await;

	let session = Session::new()
		.with_base_url(server.base_url())?
		.with_app_id(AppId::new("demo-app")?)
		.with_app_secret(AppSecret::new("demo-secret"))
		.with_user_code(UserCode::new("demo-code")?);
	// The legacy MD5 scheme is the default; swap in HMAC-SHA256 for backends that
	// verify standard MACs.
	let mut client =
		ApiClient::new(session).with_signer(Signer::new(SignatureScheme::LegacyMd5));
	let result = client.send(json!({"op": "ping"})).await?;

	println!("Generic call result: {result:?}.");
	println!(
		"Session now holds a token: {}.",
		client.access_token().map(|t| t.expose()).unwrap_or("<none>")
	);

	Ok(())
}
