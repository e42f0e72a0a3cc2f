use axum::{
    routing::{get, post},
    Router,
};
use kindred::{handlers, utils, Config, get_db_pool};
use sqlx::PgPool;
use tower_http::cors::{CorsLayer, Any};
use axum::http::{Method, HeaderValue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let config = Config::from_env()?;
    let db_config = kindred::db::DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;

    // Run migrations
    kindred::db::migrations::run_migrations(&pool).await?;

    let port = config.port;
    let app = create_router(pool, config);

    let listener = tokio::net::TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Server running on port {}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(pool: PgPool, config: Config) -> Router {
    let cors_layer = create_cors_layer(&config);
    let app_state = (pool, config);

    Router::new()
        .route("/health", get(health_check))
        // Profiles
        .route("/api/profiles", post(handlers::create_profile))
        .route("/api/profiles/{id}", get(handlers::get_profile))
        // Participant actions
        .route("/api/matches/{id}/action", post(handlers::record_action))
        .route("/api/matches/{id}/chat", post(handlers::start_chat))
        .route("/api/users/{id}/matches", get(handlers::list_matches))
        // Admin review
        .route("/api/admin/matches/{id}/approve", post(handlers::approve_match))
        .route("/api/admin/matches/{id}/reject", post(handlers::reject_match))
        .layer(cors_layer)
        .with_state(app_state)
}

fn create_cors_layer(_config: &Config) -> CorsLayer {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(false);

    // Check if ALLOWED_ORIGINS environment variable is set for multiple domains
    if let Ok(cors_origins) = std::env::var("ALLOWED_ORIGINS") {
        let origins: Vec<HeaderValue> = cors_origins
            .split(',')
            .filter_map(|origin| {
                let trimmed = origin.trim();
                if !trimmed.is_empty() {
                    trimmed.parse().ok()
                } else {
                    None
                }
            })
            .collect();

        if !origins.is_empty() {
            cors = cors.allow_origin(origins);
        } else {
            // Fallback to permissive if parsing fails
            cors = cors.allow_origin(Any);
        }
    } else {
        // Default to permissive for development
        cors = cors.allow_origin(Any);
    }

    cors
}

async fn health_check() -> &'static str {
    "OK"
}
