use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::common::{Localized, PaginationResults};

/// A published tour listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tour {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub price: f64,
    pub currency: String,
    pub duration_days: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    pub destination_id: String,
    pub organizer_id: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Tour list filter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListTourService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

/// Tour list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTourResponse {
    pub tours: Vec<Tour>,
    pub pagination: PaginationResults,
}

/// Create/update payload for the organizer dashboard. `id` is absent on
/// create and required on update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertTourService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Localized,
    pub description: Localized,
    pub price: f64,
    pub currency: String,
    pub duration_days: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    pub destination_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// A destination tours can be filed under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: Localized,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
