//! Slack Archive Viewer
//!
//! Serves a read-only, routed view over an exported Slack workspace loaded into memory.

mod api;
mod bootstrap;
mod config;
mod errors;
mod loader;
mod models;
mod pages;
mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::sync::{RwLock, RwLockReadGuard};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bootstrap::LoadStatus;
use config::Config;
use errors::AppError;
use loader::{DataSource, FsDataSource};
use models::Team;
use store::Store;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<Store>>,
    pub status: Arc<RwLock<LoadStatus>>,
    pub config: Arc<Config>,
}

impl AppState {
    /// State for a freshly read manifest: empty store, status `Loading`.
    pub fn new(team: Team, config: Config) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::new(team))),
            status: Arc::new(RwLock::new(LoadStatus::Loading)),
            config: Arc::new(config),
        }
    }

    /// Read access to the store once it can be shown, with any partial-load warnings.
    pub async fn viewable_store(
        &self,
    ) -> Result<(RwLockReadGuard<'_, Store>, Vec<String>), AppError> {
        let warnings = self.status.read().await.ensure_viewable()?.to_vec();
        Ok((self.store.read().await, warnings))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Slack Archive Viewer");
    tracing::info!("Data directory: {:?}", config.data_dir);
    tracing::info!("Load policy: {}", config.load_policy.as_str());
    tracing::info!("Bind address: {}", config.bind_addr);

    let source: Arc<dyn DataSource> = Arc::new(FsDataSource::new(&config.data_dir));
    let team = loader::load_team(source.as_ref()).await?;

    let state = AppState::new(team, config.clone());

    // Pages answer NOT_READY until both loads have finished
    tokio::spawn({
        let state = state.clone();
        async move {
            if let Err(e) = bootstrap::load_archive(source, &state).await {
                tracing::error!("Archive unavailable: {}", e);
            }
        }
    });

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Pages
    let page_routes = Router::new()
        .route("/", get(pages::root_redirect))
        .route(pages::CHANNEL_ROUTE, get(pages::show))
        .route("/channel/", get(pages::show))
        .route("/channel/{channel}", get(pages::show));

    // API routes
    let api_routes = Router::new()
        .route("/status", get(api::get_status))
        .route("/team", get(api::get_team))
        .route("/channels", get(api::list_channels))
        .route("/channels/{id}", get(api::get_channel))
        .route("/users", get(api::list_users))
        .route("/users/{id}", get(api::get_user));

    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(health_routes)
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod fixtures;
