//! Demonstrates exchanging a user code for an access token against a mock service,
//! then fetching the user's profile with the stored token.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use clef_client::{
	auth::{AppId, AppSecret, Session, UserCode},
	client::ApiClient,
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
			when.method(GET).path("/info");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":42,\"email\":\"user@example.com\"}");
		})
		.await;

	let session = Session::new()
		.with_base_url(server.base_url())?
		.with_app_id(AppId::new("demo-app")?)
		.with_app_secret(AppSecret::new("demo-secret"));
	let mut client = ApiClient::new(session);
	let authorization = client
		.authenticate(Some(&UserCode::new("demo-code")?))
		.await?
		.expect("Mock authorize response should decode.");

	println!(
		"Issued access token: {}.",
		authorization.access_token.as_ref().map(|t| t.expose()).unwrap_or("<none>")
	);

	let profile = client.user_info().await?.expect("Mock profile response should decode.");

	println!("Profile e-mail: {}.", profile.email.as_deref().unwrap_or("<none>"));

	Ok(())
}
