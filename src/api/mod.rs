//! REST API module.
//!
//! Contains all API routes and handlers. Validation of required fields
//! happens here, before any persistence call; repositories return
//! `Option`/`Result` and handlers map absent rows to NotFound.

mod articles;
mod auth;
mod courses;
mod pdfs;
mod topics;
mod uploads;
mod youtube;

pub use articles::*;
pub use auth::*;
pub use courses::*;
pub use pdfs::*;
pub use topics::*;
pub use uploads::*;
pub use youtube::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Success response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(data))
}

/// Shared query parameters for paginated resource listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_items_per_page")]
    pub items_per_page: i64,
    #[serde(default)]
    pub archived: bool,
}

fn default_page() -> i64 {
    1
}

fn default_items_per_page() -> i64 {
    10
}
