//! Topic model: a user-owned named collection grouping resources.

use serde::{Deserialize, Serialize};

/// A topic owned by a user. Deleting a topic cascades to every resource
/// attached to it at the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub user_id: i64,
    /// Epoch milliseconds of the last interaction with this topic
    pub last_active: i64,
}

/// Request body for creating a new topic.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    pub title: String,
}

/// Request body for updating an existing topic. Absent fields keep their
/// current value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_active: Option<i64>,
}
