pub mod auth;
pub mod organizer;
pub mod tour;

// Re-export for convenience
pub use auth::AuthApi;
pub use organizer::OrganizerApi;
pub use tour::TourApi;
