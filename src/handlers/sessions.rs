use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::handlers::AppJson;
use crate::middleware::AuthUser;
use crate::models::{resolve_sets, CreateSession, UpdateSession};
use crate::repositories::{SessionRepository, WorkoutRepository};

#[derive(Clone)]
pub struct SessionsState {
    pub session_repo: SessionRepository,
    pub workout_repo: WorkoutRepository,
}

#[derive(Deserialize)]
pub struct SessionQuery {
    pub id: Option<i64>,
    pub workout_id: Option<i64>,
}

/// `GET /sessions`: the caller's sessions newest-first (optionally filtered
/// by `?workout_id=`), or one session with its sets when `?id=` is given.
pub async fn list(
    State(state): State<SessionsState>,
    auth_user: AuthUser,
    Query(query): Query<SessionQuery>,
) -> Result<Response> {
    if let Some(id) = query.id {
        let session = state
            .session_repo
            .find_detail(id, auth_user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Session not found".to_string()))?;
        return Ok(Json(session).into_response());
    }

    let sessions = state
        .session_repo
        .find_all(auth_user.id, query.workout_id)
        .await?;
    Ok(Json(json!({ "sessions": sessions })).into_response())
}

pub async fn create(
    State(state): State<SessionsState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateSession>,
) -> Result<Response> {
    let workout_id = req
        .workout_id
        .ok_or_else(|| AppError::Validation("Workout ID is required".to_string()))?;

    // The referenced workout must exist and belong to the caller.
    state
        .workout_repo
        .find_by_id(workout_id, auth_user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

    let session_date = req
        .session_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let sets = resolve_sets(req.sets.as_deref().unwrap_or(&[]));

    let session = state
        .session_repo
        .create(
            auth_user.id,
            workout_id,
            session_date,
            req.notes.as_deref().unwrap_or(""),
            sets,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Session created successfully",
            "session": session,
        })),
    )
        .into_response())
}

pub async fn update(
    State(state): State<SessionsState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<UpdateSession>,
) -> Result<Response> {
    let id = req
        .id
        .ok_or_else(|| AppError::Validation("Session ID is required".to_string()))?;

    let sets = req.sets.as_deref().map(resolve_sets);

    let updated = state
        .session_repo
        .update(id, auth_user.id, req.session_date, req.notes, sets)
        .await?;
    if !updated {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    Ok(Json(json!({ "message": "Session updated successfully" })).into_response())
}

pub async fn delete(
    State(state): State<SessionsState>,
    auth_user: AuthUser,
    Query(query): Query<SessionQuery>,
) -> Result<Response> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Session ID is required".to_string()))?;

    let deleted = state.session_repo.delete(id, auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    Ok(Json(json!({ "message": "Session deleted successfully" })).into_response())
}
