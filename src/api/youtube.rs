//! YouTube link API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult, ListQuery};
use crate::errors::AppError;
use crate::models::{CreateResourceRequest, ResourcePage, UpdateResourceRequest, Youtube};
use crate::AppState;

/// GET /api/youtube/topic/:topicId - List a page of a topic's YouTube links.
pub async fn list_youtube_links(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ResourcePage<Youtube>> {
    if state.repo.find_topic_by_id(topic_id).await?.is_none() {
        return Err(AppError::NotFound("No topic found!".to_string()));
    }

    let resources = state
        .repo
        .list_youtube_links(topic_id, query.page, query.items_per_page, query.archived)
        .await?;
    let count = state
        .repo
        .count_youtube_links(topic_id, query.archived)
        .await?;

    success(ResourcePage { resources, count })
}

/// GET /api/youtube/:id - Get a single YouTube link.
pub async fn get_youtube_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Youtube> {
    let link = state
        .repo
        .find_youtube_link_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Youtube link {} not found", id)))?;

    success(link)
}

/// POST /api/youtube - Attach a YouTube link to a topic.
pub async fn create_youtube_link(
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> ApiResult<Youtube> {
    if request.title.trim().is_empty() || request.url.trim().is_empty() {
        return Err(AppError::Validation("Not enough data!".to_string()));
    }
    if state.repo.find_topic_by_id(request.topic_id).await?.is_none() {
        return Err(AppError::NotFound("Topic does not exist!".to_string()));
    }

    let link = state.repo.create_youtube_link(&request).await?;
    success(link)
}

/// PUT /api/youtube/:id - Update a YouTube link (partial merge; omitting
/// `archived` resets it).
pub async fn update_youtube_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateResourceRequest>,
) -> ApiResult<Youtube> {
    let existing = state
        .repo
        .find_youtube_link_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("No youtube link found to update!".to_string()))?;

    let link = state.repo.update_youtube_link(&existing, &request).await?;
    success(link)
}

/// DELETE /api/youtube/:id - Delete a YouTube link.
pub async fn delete_youtube_link(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state.repo.delete_youtube_link(id).await?;
    success(())
}
