//! Upload URL API endpoints.

use std::collections::HashMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::AppState;

/// Request body for the batch upload-URL endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsRequest {
    pub filenames: Vec<String>,
    pub user_id: i64,
}

/// Map of filename to pre-signed upload URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlsResponse {
    pub urls: HashMap<String, String>,
}

/// POST /api/uploads - Issue a pre-signed upload URL per requested filename,
/// keyed under the owning user.
pub async fn get_upload_urls(
    State(state): State<AppState>,
    Json(request): Json<UploadUrlsRequest>,
) -> ApiResult<UploadUrlsResponse> {
    if request.filenames.is_empty() {
        return Err(AppError::Validation("No filename was provided!".to_string()));
    }
    if state.repo.find_user_by_id(request.user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found!".to_string()));
    }

    let mut urls = HashMap::new();
    for filename in &request.filenames {
        let url = state.uploads.upload_url(filename, request.user_id).await?;
        urls.insert(filename.clone(), url);
    }

    success(UploadUrlsResponse { urls })
}
