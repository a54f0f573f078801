//! Article API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult, ListQuery};
use crate::errors::AppError;
use crate::models::{Article, CreateResourceRequest, ResourcePage, UpdateResourceRequest};
use crate::AppState;

/// GET /api/articles/topic/:topicId - List a page of a topic's articles.
pub async fn list_articles(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ResourcePage<Article>> {
    if state.repo.find_topic_by_id(topic_id).await?.is_none() {
        return Err(AppError::NotFound("No topic found!".to_string()));
    }

    let resources = state
        .repo
        .list_articles(topic_id, query.page, query.items_per_page, query.archived)
        .await?;
    let count = state.repo.count_articles(topic_id, query.archived).await?;

    success(ResourcePage { resources, count })
}

/// GET /api/articles/:id - Get a single article.
pub async fn get_article(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Article> {
    let article = state
        .repo
        .find_article_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", id)))?;

    success(article)
}

/// POST /api/articles - Attach an article to a topic.
pub async fn create_article(
    State(state): State<AppState>,
    Json(request): Json<CreateResourceRequest>,
) -> ApiResult<Article> {
    if request.title.trim().is_empty() || request.url.trim().is_empty() {
        return Err(AppError::Validation("Not enough data!".to_string()));
    }
    if state.repo.find_topic_by_id(request.topic_id).await?.is_none() {
        return Err(AppError::NotFound("Topic does not exist!".to_string()));
    }

    let article = state.repo.create_article(&request).await?;
    success(article)
}

/// PUT /api/articles/:id - Update an article (partial merge; omitting
/// `archived` resets it).
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateResourceRequest>,
) -> ApiResult<Article> {
    let existing = state
        .repo
        .find_article_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("No article found to update!".to_string()))?;

    let article = state.repo.update_article(&existing, &request).await?;
    success(article)
}

/// DELETE /api/articles/:id - Delete an article.
pub async fn delete_article(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_article(id).await?;
    success(())
}
