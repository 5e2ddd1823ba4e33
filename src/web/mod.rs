//! HTTP services
//!
//! Two independently deployable services share this module:
//! - the search service ([`routes`]): search page, form lookup and JSON API
//! - the gateway ([`gateway::routes`]): relays `GET /api/cases/search` to an
//!   upstream search service

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod page;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::CaseStore;
use error::ApiError;
use page::{PageError, PageRenderer};

/// Path of the query-string search API, shared with the gateway
pub const SEARCH_API_PATH: &str = "/api/cases/search";

/// Shared state of the search service
#[derive(Clone)]
pub struct AppState {
    pub store: CaseStore,
    pub pages: Arc<PageRenderer>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(store: CaseStore, request_timeout: Duration) -> Result<Self, PageError> {
        Ok(Self {
            store,
            pages: Arc::new(PageRenderer::new()?),
            request_timeout,
        })
    }

    /// Run a store operation on the blocking pool, bounded by the request timeout
    pub async fn run_blocking<T, E, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<ApiError> + Send + 'static,
    {
        let task = tokio::task::spawn_blocking(f);
        match tokio::time::timeout(self.request_timeout, task).await {
            Ok(Ok(result)) => result.map_err(Into::into),
            Ok(Err(join_err)) => Err(ApiError::Internal(format!(
                "store task failed: {}",
                join_err
            ))),
            Err(_) => Err(ApiError::Timeout(self.request_timeout)),
        }
    }
}

/// Build the search service router
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/search_case", post(handlers::search_case))
        .route(SEARCH_API_PATH, get(handlers::search_case_query))
        .route("/api/cases/search/type", get(handlers::search_type))
        .with_state(state)
}

/// Bind `addr` and serve `router` until Ctrl-C
pub async fn serve(addr: SocketAddr, router: Router, name: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("{} listening on http://{}", name, listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
