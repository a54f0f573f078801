//! Flat resource models: articles, PDFs and YouTube links attached to a topic.
//!
//! The three kinds share the same contract shape; Pdf additionally tracks
//! reading progress (`numPages` / `lastPageRead`).

use serde::{Deserialize, Serialize};

/// An article attached to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub topic_id: i64,
    pub last_active: i64,
    pub archived: bool,
}

/// A PDF attached to a topic, with per-page reading progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pdf {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub topic_id: i64,
    pub num_pages: i64,
    pub last_page_read: i64,
    pub last_active: i64,
    pub archived: bool,
}

/// A YouTube link attached to a topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Youtube {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub topic_id: i64,
    pub last_active: i64,
    pub archived: bool,
}

/// Request body for attaching an article or YouTube link to a topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourceRequest {
    pub topic_id: i64,
    pub title: String,
    pub url: String,
}

/// Request body for attaching a PDF to a topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePdfRequest {
    pub topic_id: i64,
    pub title: String,
    pub url: String,
    pub num_pages: i64,
}

/// Request body for updating a flat resource.
///
/// Absent fields keep their current value, with one deliberate exception:
/// `archived` is coerced, so omitting it resets the flag to `false`. Clients
/// rely on "omit to unarchive"; this is the frozen contract, not an accident.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourceRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_active: Option<i64>,
    #[serde(default)]
    pub last_page_read: Option<i64>,
    #[serde(default)]
    pub archived: bool,
}

/// One page of resources plus the total count for the topic/archived filter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePage<T> {
    pub resources: Vec<T>,
    pub count: i64,
}
