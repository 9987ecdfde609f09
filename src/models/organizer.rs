use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::{Localized, PaginationResults};

/// Public profile of a tour organizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizerProfile {
    pub id: String,
    pub name: String,
    pub bio: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Profile update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileService {
    pub name: String,
    pub bio: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A blog post written by an organizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: Localized,
    pub body: Localized,
    pub organizer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Create/update payload for blog posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertBlogPostService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Localized,
    pub body: Localized,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Blog list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListBlogResponse {
    pub posts: Vec<BlogPost>,
    pub pagination: PaginationResults,
}
