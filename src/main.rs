use anyhow::Result;
use axum::{routing::get, Router};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::Database;
use std::net::SocketAddr;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fyyur::{
    config::{Config, LogFormat},
    db::enums::Catalog,
    handlers,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fyyur=debug,tower_http=debug,axum=trace".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("Starting Fyyur...");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Run migrations
    migration::Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port).parse()?;
    let state = AppState::new(db, config, Catalog::standard());

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(handlers::html_routes())
        .nest_service("/static", ServeDir::new(&state.config.static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
