pub mod auth;
pub mod health;
pub mod sessions;
pub mod weight;
pub mod workouts;

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor whose rejection carries the API's 400 error shape
/// instead of axum's default plain-text response.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
