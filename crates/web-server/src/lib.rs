use crate::error::AppError;
use api_client::{AlphaVantageClient, MarketDataProvider};
use axum::{routing::get, Router};
use configuration::Config;
use dashboard::DashboardSettings;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
// Note: Tracing is handled by the main application configuration

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// Holds only immutable collaborators; no request leaves anything behind.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn MarketDataProvider>,
    pub settings: DashboardSettings,
}

impl AppState {
    /// Builds the state backed by the live provider described in `config`.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        config.validate()?;
        let client = AlphaVantageClient::new(&config.provider)?;
        Ok(Self {
            provider: Arc::new(client),
            settings: DashboardSettings::from(&config.metrics),
        })
    }
}

/// Defines the application routes.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/metrics/:ticker", get(handlers::get_metrics))
        .with_state(Arc::new(state))
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    // Note: Tracing is already initialized by the caller, so we don't initialize it again here.
    let app = router(state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
