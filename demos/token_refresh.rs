use tourhub_api::api::{AuthApi, OrganizerApi};
use tourhub_api::{Client, ClientConfig, FileTokenStore};

use std::sync::Arc;

/// This example demonstrates automatic token refresh
///
/// The client automatically handles:
/// 1. Detecting that an access token has expired (HTTP 401)
/// 2. Using the refresh token to get a new access token
/// 3. Retrying the original request with the new token
///
/// All of this happens transparently - your code doesn't need to worry about it!
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A file-backed store keeps the session across restarts
    let store = Arc::new(FileTokenStore::open("tourhub-tokens.json")?);

    let config = ClientConfig::new("https://api.tourhub.example.com").with_timeout(30);
    let client = Client::with_store(config, store);

    // Login and seed the store
    println!("=== Logging in ===");
    let login = client.login("organizer@example.com", "password").await?;
    client.set_tokens(&login.token.access_token, &login.token.refresh_token);
    println!("✓ Tokens stored");

    // Make an authenticated call - the client attaches the bearer token
    println!("\n=== Loading organizer profile ===");
    let profile = client.get_profile().await?;
    println!("✓ Profile: {}", profile.name);

    // Simulate an expired access token. The refresh token stays valid, so
    // the next call will 401, refresh silently and retry once.
    println!("\n=== Simulating token expiration ===");
    client.set_tokens("expired-token", &login.token.refresh_token);

    match client.get_profile().await {
        Ok(profile) => {
            println!("✓ Request succeeded! Profile: {}", profile.name);
            println!("  (Token was automatically refreshed)");
        }
        Err(e) => {
            println!("✗ Request failed: {}", e);
            if e.requires_login() {
                println!("  → This error requires re-authentication");
            }
        }
    }

    // Clearing tokens returns the client to the logged-out state
    println!("\n=== Logging out ===");
    client.clear_tokens();

    match client.get_profile().await {
        Ok(_) => println!("Unexpected success"),
        Err(e) => {
            println!("✓ Got expected error: {}", e);
            if e.requires_login() {
                println!("  → This error requires re-authentication");
            }
        }
    }

    Ok(())
}
