//! Router assembly and the listener loop.

use anyhow::Context;
use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{Config, REQUEST_TIMEOUT};
use crate::handlers;
use crate::middleware::{
    with_bsvalias_headers, with_request_logging, with_request_timeout, RequestObserver,
    TracingObserver,
};
use crate::services::{DirectoryError, DirectoryResolver, Resolver, TimeoutResolver};

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub resolver: Arc<dyn Resolver>,
}

impl AppState {
    /// Wrap `resolver` in the configured resolve timeout.
    pub fn new(config: Config, resolver: Arc<dyn Resolver>) -> Self {
        let resolver = Arc::new(TimeoutResolver::new(resolver, config.resolve_timeout));
        Self { config, resolver }
    }

    /// Build state from `config`, loading the directory file if one is set.
    pub async fn from_config(config: Config) -> Result<Self, DirectoryError> {
        let directory = match &config.directory {
            Some(path) => DirectoryResolver::load(path).await?,
            None => {
                tracing::warn!("No directory configured, every lookup will miss");
                DirectoryResolver::empty()
            }
        };

        Ok(Self::new(config, Arc::new(directory)))
    }
}

/// Create the API router.
///
/// Requests are logged through `observer` when given; pass `None` to leave
/// logging out entirely.
pub fn create_router(state: Arc<AppState>, observer: Option<Arc<dyn RequestObserver>>) -> Router {
    let router = Router::new()
        .route("/.well-known/bsvalias", get(handlers::service_discovery))
        .route("/api/v1/bsvalias/id/:paymail", get(handlers::identity))
        .route(
            "/api/v1/bsvalias/address/:paymail",
            get(handlers::payment_destination),
        );
    let router = with_request_timeout(router, REQUEST_TIMEOUT).with_state(state);

    let router = match observer {
        Some(observer) => with_request_logging(router, observer),
        None => router,
    };

    with_bsvalias_headers(router)
}

/// Router with the default `tracing` request log, honouring `log_requests`.
pub fn app(state: Arc<AppState>) -> Router {
    let observer: Option<Arc<dyn RequestObserver>> = if state.config.log_requests {
        Some(Arc::new(TracingObserver))
    } else {
        None
    };
    create_router(state, observer)
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!(
        %addr,
        base_url = %state.config.base_url,
        "Paymail server listening"
    );

    axum::serve(listener, app(Arc::new(state))).await?;
    Ok(())
}
