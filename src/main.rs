use std::sync::Arc;

use restaurant_api::{
    auth::{AuthService, LogEmailNotifier, PasswordService, TokenService, UserRepository},
    config::Config,
    create_router, db,
    restaurants::PgRestaurantStore,
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("restaurant_api=debug,tower_http=info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Restaurant API - Starting...");

    let config = Config::from_env()?;

    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database_url, &config.pool).await?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;
    tracing::info!("Migrations completed successfully");

    let auth = AuthService::new(
        Arc::new(UserRepository::new(db_pool.clone())),
        PasswordService::new(config.hashing)?,
        TokenService::new(config.jwt_secret.clone()),
        Arc::new(LogEmailNotifier),
    );
    let state = AppState {
        restaurants: Arc::new(PgRestaurantStore::new(db_pool)),
        auth: Arc::new(auth),
    };

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Restaurant API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
