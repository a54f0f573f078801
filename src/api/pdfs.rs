//! PDF API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{success, ApiResult, ListQuery};
use crate::errors::AppError;
use crate::models::{CreatePdfRequest, Pdf, ResourcePage, UpdateResourceRequest};
use crate::AppState;

/// GET /api/pdfs/topic/:topicId - List a page of a topic's PDFs.
pub async fn list_pdfs(
    State(state): State<AppState>,
    Path(topic_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ResourcePage<Pdf>> {
    if state.repo.find_topic_by_id(topic_id).await?.is_none() {
        return Err(AppError::NotFound("No topic found!".to_string()));
    }

    let resources = state
        .repo
        .list_pdfs(topic_id, query.page, query.items_per_page, query.archived)
        .await?;
    let count = state.repo.count_pdfs(topic_id, query.archived).await?;

    success(ResourcePage { resources, count })
}

/// GET /api/pdfs/:id - Get a single PDF.
pub async fn get_pdf(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Pdf> {
    let pdf = state
        .repo
        .find_pdf_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pdf {} not found", id)))?;

    success(pdf)
}

/// POST /api/pdfs - Attach a PDF to a topic.
pub async fn create_pdf(
    State(state): State<AppState>,
    Json(request): Json<CreatePdfRequest>,
) -> ApiResult<Pdf> {
    if request.title.trim().is_empty() || request.url.trim().is_empty() {
        return Err(AppError::Validation("Not enough data!".to_string()));
    }
    if request.num_pages < 1 {
        return Err(AppError::Validation("Page count must be positive".to_string()));
    }
    if state.repo.find_topic_by_id(request.topic_id).await?.is_none() {
        return Err(AppError::NotFound("Topic does not exist!".to_string()));
    }

    let pdf = state.repo.create_pdf(&request).await?;
    success(pdf)
}

/// PUT /api/pdfs/:id - Update a PDF (partial merge; omitting `archived`
/// resets it).
pub async fn update_pdf(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateResourceRequest>,
) -> ApiResult<Pdf> {
    let existing = state
        .repo
        .find_pdf_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("No pdf found to update!".to_string()))?;

    let pdf = state.repo.update_pdf(&existing, &request).await?;
    success(pdf)
}

/// DELETE /api/pdfs/:id - Delete a PDF.
pub async fn delete_pdf(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_pdf(id).await?;
    success(())
}
