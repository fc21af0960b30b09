use axum::{routing::get, Extension, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{auth, health, sessions, weight, workouts};
use crate::repositories::TokenRepository;

pub fn create_router(
    auth_state: auth::AuthState,
    workouts_state: workouts::WorkoutsState,
    sessions_state: sessions::SessionsState,
    weight_state: weight::WeightState,
    token_repo: TokenRepository,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        // Auth routes
        .route("/auth", get(auth::verify).post(auth::auth_post))
        .with_state(auth_state)
        // Workout routes
        .route(
            "/workouts",
            get(workouts::list)
                .post(workouts::create)
                .put(workouts::update)
                .delete(workouts::delete),
        )
        .with_state(workouts_state)
        // Session routes
        .route(
            "/sessions",
            get(sessions::list)
                .post(sessions::create)
                .put(sessions::update)
                .delete(sessions::delete),
        )
        .with_state(sessions_state)
        // Weight routes
        .route(
            "/weight",
            get(weight::list)
                .post(weight::create)
                .put(weight::update)
                .delete(weight::delete),
        )
        .with_state(weight_state)
        // Token repository via Extension so the AuthUser extractor can
        // resolve bearer tokens on any route
        .layer(Extension(token_repo))
        .layer(cors)
}
