use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An admin-authored page or news article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Option<i64>,
    /// URL path segment; unique across the store
    pub slug: String,
    pub title: String,
    /// Authored body, rendered as-is into the page shell
    pub body: String,
    /// "page" | "news"
    pub template: String,
    pub updated_at: DateTime<Utc>,
}

/// A contact-form submission, kept as an audit trail regardless of whether
/// the relay delivered it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}
