//! Meteorologia Mock API - Backend Server
//!
//! Serves synthetic weather observations, forecasts and a small read-only
//! catalogue of weather stations for clients under development.

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shared::catalogue::StationCatalogue;
use shared::generator::WeatherGenerator;

mod config;
mod error;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;

pub use crate::config::Config;
use crate::config::LogFormat;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<StationCatalogue>,
    pub generator: Arc<WeatherGenerator>,
    /// Add `exception_type` / `stack_trace` to structured error bodies
    pub expose_error_details: bool,
}

impl AppState {
    /// Build the catalogue and generator described by `config`
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let now = chrono::Local::now().naive_local();
        let catalogue = match &config.catalogue.stations_file {
            Some(path) => StationCatalogue::load_file(path, now)?,
            None => StationCatalogue::fixture_at(now),
        };
        let generator = WeatherGenerator::from_seed(config.generator.seed);

        Ok(Self {
            catalogue: Arc::new(catalogue),
            generator: Arc::new(generator),
            expose_error_details: config.errors.expose_details,
        })
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        let mut config = Config::default();
        config.generator.seed = Some(seed);
        Self::new(&config).expect("built-in fixture is valid")
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.clone().into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }

    tracing::info!("Starting Meteorologia Mock API");
    tracing::info!("Environment: {}", config.environment);

    // Create application state
    let state = AppState::new(&config)?;
    tracing::info!("Loaded {} stations", state.catalogue.len());
    if state.generator.is_seeded() {
        tracing::info!("Weather generator seeded for reproducible output");
    }

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::error_details,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::response_headers))
        .with_state(state)
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
