use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::handlers::AppJson;
use crate::middleware::AuthUser;
use crate::models::{CreateWeightEntry, UpdateWeightEntry};
use crate::repositories::WeightRepository;

#[derive(Clone)]
pub struct WeightState {
    pub weight_repo: WeightRepository,
}

#[derive(Deserialize)]
pub struct WeightQuery {
    pub id: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// `GET /weight`: the caller's entries newest-first, optionally restricted to
/// `?start_date=`/`?end_date=`, or one entry when `?id=` is given.
pub async fn list(
    State(state): State<WeightState>,
    auth_user: AuthUser,
    Query(query): Query<WeightQuery>,
) -> Result<Response> {
    if let Some(id) = query.id {
        let entry = state
            .weight_repo
            .find_by_id(id, auth_user.id)
            .await?
            .ok_or_else(|| AppError::NotFound("Weight entry not found".to_string()))?;
        return Ok(Json(entry).into_response());
    }

    let entries = state
        .weight_repo
        .find_all(auth_user.id, query.start_date, query.end_date)
        .await?;
    Ok(Json(json!({ "weights": entries })).into_response())
}

pub async fn create(
    State(state): State<WeightState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateWeightEntry>,
) -> Result<Response> {
    let weight = req.weight.filter(|w| *w > 0.0).ok_or_else(|| {
        AppError::Validation("Valid weight is required".to_string())
    })?;

    let weight_date = req
        .weight_date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let entry = state
        .weight_repo
        .create(
            auth_user.id,
            weight,
            weight_date,
            req.notes.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Weight entry added successfully",
            "weight": entry,
        })),
    )
        .into_response())
}

pub async fn update(
    State(state): State<WeightState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<UpdateWeightEntry>,
) -> Result<Response> {
    let id = req
        .id
        .ok_or_else(|| AppError::Validation("Weight ID is required".to_string()))?;

    if matches!(req.weight, Some(w) if w <= 0.0) {
        return Err(AppError::Validation("Valid weight is required".to_string()));
    }

    let updated = state
        .weight_repo
        .update(id, auth_user.id, req.weight, req.weight_date, req.notes)
        .await?;
    if !updated {
        return Err(AppError::NotFound("Weight entry not found".to_string()));
    }

    Ok(Json(json!({ "message": "Weight entry updated successfully" })).into_response())
}

pub async fn delete(
    State(state): State<WeightState>,
    auth_user: AuthUser,
    Query(query): Query<WeightQuery>,
) -> Result<Response> {
    let id = query
        .id
        .ok_or_else(|| AppError::Validation("Weight ID is required".to_string()))?;

    let deleted = state.weight_repo.delete(id, auth_user.id).await?;
    if !deleted {
        return Err(AppError::NotFound("Weight entry not found".to_string()));
    }

    Ok(Json(json!({ "message": "Weight entry deleted successfully" })).into_response())
}
