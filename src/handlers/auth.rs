use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::handlers::AppJson;
use crate::middleware::{auth::bearer_token, AuthUser};
use crate::models::{is_valid_email, AuthRequest, UserInfo};
use crate::repositories::{TokenRepository, UserRepository};

#[derive(Clone)]
pub struct AuthState {
    pub user_repo: UserRepository,
    pub token_repo: TokenRepository,
}

/// `POST /auth` dispatches on the `action` field: register, login, logout.
pub async fn auth_post(
    State(state): State<AuthState>,
    headers: HeaderMap,
    AppJson(req): AppJson<AuthRequest>,
) -> Result<Response> {
    match req.action.as_deref() {
        Some("register") => register(state, req).await,
        Some("login") => login(state, req).await,
        Some("logout") => logout(state, headers).await,
        _ => Err(AppError::Validation("Invalid request".to_string())),
    }
}

async fn register(state: AuthState, req: AuthRequest) -> Result<Response> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    if !is_valid_email(&email) {
        return Err(AppError::Validation("Invalid email format".to_string()));
    }
    if password.len() < 6 {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let user = state.user_repo.create(&email, &password).await?;
    let token = state.token_repo.create(user.id).await?;

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User registered successfully",
            "token": token,
            "user": UserInfo::from(&user),
        })),
    )
        .into_response())
}

async fn login(state: AuthState, req: AuthRequest) -> Result<Response> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let user = state
        .user_repo
        .verify_password(&email, &password)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // A fresh token every login; existing tokens stay valid.
    let token = state.token_repo.create(user.id).await?;

    Ok(Json(json!({
        "message": "Login successful",
        "token": token,
        "user": UserInfo::from(&user),
    }))
    .into_response())
}

async fn logout(state: AuthState, headers: HeaderMap) -> Result<Response> {
    let token = bearer_token(&headers)
        .ok_or(AppError::Unauthorized)?
        .to_string();

    // Logout requires a resolvable identity; deletion itself is idempotent.
    state
        .token_repo
        .find_valid(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    state.token_repo.delete(&token).await?;

    Ok(Json(json!({ "message": "Logged out successfully" })).into_response())
}

/// `GET /auth` verifies the presented token.
pub async fn verify(auth_user: AuthUser) -> Result<Response> {
    Ok(Json(json!({
        "valid": true,
        "user": { "id": auth_user.id, "email": auth_user.email },
    }))
    .into_response())
}
