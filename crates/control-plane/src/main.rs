// SoLBot analytics API server
// Decision: DATABASE_URL unset runs in dev mode with in-memory storage

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use solbot_control_plane::api;
use solbot_control_plane::config::ServerConfig;
use solbot_control_plane::openapi::ApiDoc;
use solbot_control_plane::storage::StorageBackend;
use solbot_control_plane::HealthService;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const DEFAULT_LOG_FILTER: &str = "solbot_control_plane=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // RUST_LOG overrides the default filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("solbot-control-plane starting...");

    let config = ServerConfig::from_env();

    let db = match &config.database_url {
        Some(url) => {
            let db = StorageBackend::postgres(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");
            db
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running in dev mode with in-memory storage");
            StorageBackend::in_memory()
        }
    };

    tracing::info!(
        dev_mode = db.is_dev_mode(),
        backend_url = %config.health.backend_url,
        environment = %config.environment,
        "Storage and backend checks configured"
    );

    let app = build_app(Arc::new(db), &config)?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Assemble API routes, Swagger UI, CORS and request tracing
fn build_app(db: Arc<StorageBackend>, config: &ServerConfig) -> Result<Router> {
    let health = HealthService::new(config.health.clone(), config.environment.clone())
        .context("Failed to build health service")?;

    let app = api::router(db, Arc::new(health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    let app = match cors_layer(&config.cors_origins) {
        Some(cors) => {
            tracing::info!(origins = ?config.cors_origins, "CORS origins configured");
            app.layer(cors)
        }
        None => {
            tracing::info!("CORS not configured (same-origin requests only)");
            app
        }
    };

    Ok(app.layer(TraceLayer::new_for_http()))
}

/// CORS layer for the configured origins, if any
fn cors_layer(origins: &[HeaderValue]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
            .allow_credentials(true),
    )
}
