pub mod auth;
pub mod common;
pub mod organizer;
pub mod tour;
