use tourhub_api::api::{AuthApi, TourApi};
use tourhub_api::models::tour::ListTourService;
use tourhub_api::{Client, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Create client configuration
    let config = ClientConfig::new("https://api.tourhub.example.com").with_timeout(30);

    let client = Client::new(config);

    // Browse without logging in
    println!("Listing tours...");
    let listing = client
        .list_tours(&ListTourService {
            page: Some(1),
            page_size: Some(10),
            ..Default::default()
        })
        .await?;

    println!("Found {} tours:", listing.tours.len());
    for tour in &listing.tours {
        println!(
            "  {} - {} {} ({} days)",
            tour.title.en, tour.price, tour.currency, tour.duration_days
        );
    }

    println!("\nListing destinations...");
    let destinations = client.list_destinations().await?;
    for destination in &destinations {
        println!("  {} ({})", destination.name.en, destination.country);
    }

    // Login for the organizer dashboard
    println!("\nLogging in...");
    let login = client.login("organizer@example.com", "password").await?;
    client.set_tokens(&login.token.access_token, &login.token.refresh_token);
    println!("Logged in");

    Ok(())
}
