//! Authentication API endpoints: signup, login, token refresh.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use super::{success, ApiResponse, ApiResult};
use crate::auth::{self, REFRESH_COOKIE};
use crate::errors::AppError;
use crate::models::{LoginRequest, SignupRequest, User};
use crate::AppState;

/// Response body for a successful login or refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token: String,
    pub user_id: i64,
}

/// Response body for a successful signup.
#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

/// POST /api/auth/signup - Register a new account.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<SignupResponse> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".to_string()));
    }
    if request.password != request.confirm_password {
        return Err(AppError::Validation("Passwords do not match!".to_string()));
    }
    if state.repo.find_user_by_email(&request.email).await?.is_some() {
        return Err(AppError::Conflict("Email already in use!".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;
    state.repo.create_user(&request.email, &password_hash).await?;

    success(SignupResponse {
        message: "User has been successfully saved!".to_string(),
    })
}

/// POST /api/auth/login - Verify credentials, issue an access token in the
/// body and a refresh token in an HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), AppError> {
    let user = state
        .repo
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Email not registered!".to_string()))?;

    if !auth::verify_password(&request.password, &user.password) {
        return Err(AppError::Auth {
            field: "password",
            message: "Password not valid!".to_string(),
        });
    }

    issue_tokens(&state, &user, jar)
}

/// GET /api/auth/refresh - Rotate both tokens from a valid refresh cookie.
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), AppError> {
    let refresh = jar
        .get(REFRESH_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| AppError::Unauthorized("Missing refresh token".to_string()))?;

    let claims = auth::verify_token(&refresh, &state.config.tokens.refresh_secret)
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token!".to_string()))?;

    let user = state
        .repo
        .find_user_by_email(&claims.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid refresh token!".to_string()))?;

    issue_tokens(&state, &user, jar)
}

/// Issue a fresh access/refresh token pair for a user.
fn issue_tokens(
    state: &AppState,
    user: &User,
    jar: CookieJar,
) -> Result<(CookieJar, ApiResponse<TokenResponse>), AppError> {
    let tokens = &state.config.tokens;
    let access = auth::create_token(user.id, &user.email, &tokens.access_secret, tokens.access_ttl)?;
    let refresh = auth::create_token(
        user.id,
        &user.email,
        &tokens.refresh_secret,
        tokens.refresh_ttl,
    )?;

    let cookie = Cookie::build((REFRESH_COOKIE, refresh))
        .http_only(true)
        .same_site(SameSite::None)
        .path("/")
        .build();

    Ok((
        jar.add(cookie),
        ApiResponse::new(TokenResponse {
            token: access,
            user_id: user.id,
        }),
    ))
}
