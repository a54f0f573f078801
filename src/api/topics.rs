//! Topic API endpoints.

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::{success, ApiResult};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::{CreateTopicRequest, Topic, UpdateTopicRequest};
use crate::AppState;

/// GET /api/topics - List the authenticated user's topics, most recently
/// active first.
pub async fn list_topics(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Topic>> {
    let topics = state.repo.list_topics(user.id).await?;
    success(topics)
}

/// POST /api/topics - Create a new topic for the authenticated user.
pub async fn create_topic(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateTopicRequest>,
) -> ApiResult<Topic> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    // Read-then-write duplicate check; the unique index on (user_id, title)
    // backs it for the concurrent case.
    if state
        .repo
        .find_topic_by_title(user.id, &request.title)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("This topic already exists!".to_string()));
    }

    let topic = state.repo.create_topic(&request.title, user.id).await?;
    success(topic)
}

/// PUT /api/topics/:id - Update a topic (partial merge).
pub async fn update_topic(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTopicRequest>,
) -> ApiResult<Topic> {
    let existing = state
        .repo
        .find_topic_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Topic does not exist!".to_string()))?;

    let topic = state.repo.update_topic(&existing, &request).await?;
    success(topic)
}

/// DELETE /api/topics/:id - Delete a topic and, via cascade, every resource
/// attached to it.
pub async fn delete_topic(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_topic(id).await?;
    success(())
}
