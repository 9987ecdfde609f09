use serde::{Deserialize, Serialize};

/// Text in the three marketplace languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub ru: String,
    pub uz: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, ru: impl Into<String>, uz: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ru: ru.into(),
            uz: uz.into(),
        }
    }
}

/// Pagination block shared by list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationResults {
    pub page: i32,
    pub page_size: i32,
    pub total: i64,
}
