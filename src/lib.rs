//! # TourHub API Client
//!
//! A Rust client for the TourHub travel-marketplace API with automatic token refresh support.
//!
//! ## Features
//!
//! - Automatic access token refresh on expired credentials, with a single retry
//! - Comprehensive error handling
//! - Type-safe API methods for tours, destinations and the organizer dashboard
//! - Pluggable token storage (in-memory or file-backed)
//!
//! ## Example
//!
//! ```no_run
//! use tourhub_api::api::{AuthApi, TourApi};
//! use tourhub_api::{Client, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://api.tourhub.example.com");
//!     let client = Client::new(config);
//!
//!     // Login and get tokens
//!     let login = client.login("organizer@example.com", "password").await?;
//!
//!     // Seed the token store for subsequent requests
//!     client.set_tokens(&login.token.access_token, &login.token.refresh_token);
//!
//!     // Use the API - tokens will be automatically refreshed if needed
//!     let tours = client.list_tours(&Default::default()).await?;
//!     println!("{} tours listed", tours.tours.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod models;
pub mod store;

pub use client::{Client, ClientConfig, RequestOptions};
pub use error::{ApiError, ApiResult};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
