#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;

use fittrack::db::{create_memory_pool, DbPool};
use fittrack::handlers::{auth, sessions, weight, workouts};
use fittrack::migrations::run_migrations_for_tests;
use fittrack::models::{User, Workout};
use fittrack::repositories::{
    SessionRepository, TokenRepository, UserRepository, WeightRepository, WorkoutRepository,
};

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations_for_tests(&pool).expect("Failed to run migrations");
    pool
}

pub fn create_test_app(pool: DbPool) -> Router {
    let user_repo = UserRepository::new(pool.clone());
    let token_repo = TokenRepository::new(pool.clone(), chrono::Duration::days(7));
    let workout_repo = WorkoutRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let weight_repo = WeightRepository::new(pool.clone());

    let auth_state = auth::AuthState {
        user_repo,
        token_repo: token_repo.clone(),
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo: workout_repo.clone(),
    };
    let sessions_state = sessions::SessionsState {
        session_repo,
        workout_repo,
    };
    let weight_state = weight::WeightState { weight_repo };

    fittrack::routes::create_router(
        auth_state,
        workouts_state,
        sessions_state,
        weight_state,
        token_repo,
    )
}

pub async fn create_test_user(pool: &DbPool, email: &str, password: &str) -> User {
    UserRepository::new(pool.clone())
        .create(email, password)
        .await
        .unwrap()
}

pub async fn bearer_header(pool: &DbPool, user: &User) -> String {
    let token = TokenRepository::new(pool.clone(), chrono::Duration::days(7))
        .create(user.id)
        .await
        .unwrap();
    format!("Bearer {token}")
}

pub async fn create_test_workout(pool: &DbPool, user_id: i64, name: &str) -> Workout {
    WorkoutRepository::new(pool.clone())
        .create(user_id, name, "")
        .await
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn delete_request(uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
