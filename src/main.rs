use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::config::Config;
use fittrack::handlers::{auth, sessions, weight, workouts};
use fittrack::repositories::{
    SessionRepository, TokenRepository, UserRepository, WeightRepository, WorkoutRepository,
};
use fittrack::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fittrack=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;

    migrations::run_migrations(&pool)?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let token_repo = TokenRepository::new(
        pool.clone(),
        chrono::Duration::days(config.token_ttl_days),
    );
    let workout_repo = WorkoutRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let weight_repo = WeightRepository::new(pool.clone());

    // Create handler states
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

    let app = routes::create_router(
        auth_state,
        workouts_state,
        sessions_state,
        weight_state,
        token_repo,
    );

    // Start server
    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
