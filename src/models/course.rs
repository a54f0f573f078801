//! Course aggregate models: a course owns ordered sections, each owning
//! ordered videos.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A structured video course attached to a topic.
///
/// `last_watched` is the ordinal `order` of the furthest watched video, not a
/// timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub topic_id: i64,
    pub last_active: i64,
    pub last_watched: i64,
    pub archived: bool,
    pub total_items: i64,
}

/// A section of a course. Videos are loaded separately on the tree read path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: i64,
    pub title: String,
    pub course_id: i64,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_video_length: Option<String>,
}

/// A video within a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub section_id: i64,
    pub order: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub watched: bool,
    pub minutes_watched: i64,
}

/// A section with its videos, ordered by `order`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTree {
    #[serde(flatten)]
    pub section: Section,
    pub videos: Vec<Video>,
}

/// A full course tree as returned by the course read path, augmented with the
/// derived next-URL map and watched-URL list. Neither derived field is ever
/// persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseTree {
    #[serde(flatten)]
    pub course: Course,
    pub sections: Vec<SectionTree>,
    /// Every video URL mapped to the URL that plays after it (null for the
    /// final video of the course)
    pub next_urls: HashMap<String, Option<String>>,
    /// URLs of videos already marked watched, in course order
    pub watched_videos: Vec<String>,
}

/// Nested video payload inside a course create/append request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub order: i64,
    #[serde(default)]
    pub duration: Option<String>,
}

/// Nested section payload inside a course create/append request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSection {
    pub title: String,
    pub order: i64,
    #[serde(default)]
    pub total_video_length: Option<String>,
    #[serde(default)]
    pub videos: Vec<NewVideo>,
}

/// Request body for creating a course with its full section/video tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub topic_id: i64,
    pub title: String,
    #[serde(default = "default_total_items")]
    pub total_items: i64,
    #[serde(default)]
    pub sections: Vec<NewSection>,
}

fn default_total_items() -> i64 {
    1
}

/// Request body for appending sections to an existing course. Supplied
/// `order` values are trusted; nothing deduplicates them against the
/// sections already present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSectionsRequest {
    #[serde(default)]
    pub total_items: Option<i64>,
    pub sections: Vec<NewSection>,
}

/// Request body for updating a course. `archived` is coerced: omitting it
/// resets the flag to `false` (frozen contract shared with flat resources).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub last_watched: Option<i64>,
    #[serde(default)]
    pub archived: bool,
}

/// Request body for updating a section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSectionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// Request body for updating a video. `watched` is coerced like `archived`:
/// omitting it resets the flag to `false`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub minutes_watched: Option<i64>,
    #[serde(default)]
    pub watched: bool,
}
