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
use crate::models::{CreateWorkout, UpdateWorkout};
use crate::repositories::WorkoutRepository;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
}

#[derive(Deserialize)]
pub struct WorkoutQuery {
    pub id: Option<i64>,
}

/// `GET /workouts`: all of the caller's workouts ordered by name, or a single
/// one when `?id=` is given.
pub async fn list(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Query(query): Query<WorkoutQuery>,
) -> Result<Response> {
    if let Some(id) = query.id {
        let workout = state
            .workout_repo
            .find_by_id(id, auth_user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;
        return Ok(Json(workout).into_response());
    }

    let workouts = state.workout_repo.find_all(auth_user.id).await?;
    Ok(Json(json!({ "workouts": workouts })).into_response())
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateWorkout>,
) -> Result<Response> {
    let name = req.name.unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::Validation("Workout name is required".to_string()));
    }

    let workout = state
        .workout_repo
        .create(auth_user.id, &name, req.description.as_deref().unwrap_or(""))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Workout created successfully",
            "workout": workout,
        })),
    )
        .into_response())
}

pub async fn update(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<UpdateWorkout>,
) -> Result<Response> {
    let id = req
        .id
        .ok_or_else(|| AppError::Validation("Workout ID is required".to_string()))?;

    if matches!(req.name.as_deref(), Some("")) {
        return Err(AppError::Validation("Workout name is required".to_string()));
    }

    let updated = state
        .workout_repo
        .update(id, auth_user.id, req.name, req.description)
        .await?;
    if !updated {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Json(json!({ "message": "Workout updated successfully" })).into_response())
}

pub async fn delete(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Query(query): Query<WorkoutQuery>,
) -> Result<Response> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Workout ID is required".to_string()))?;

    let deleted = state.workout_repo.delete(id, auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Workout not found".to_string()));
    }

    Ok(Json(json!({ "message": "Workout deleted successfully" })).into_response())
}
