//! Gateway service
//!
//! Forwards `GET /api/cases/search` with its query string untouched to an
//! upstream search service and relays the upstream status and JSON body.
//! Upstream failures become a 502 instead of propagating.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use thiserror::Error;

use crate::web::error::ApiResponse;
use crate::web::SEARCH_API_PATH;

/// Message returned when the upstream cannot be used
pub const UPSTREAM_UNAVAILABLE: &str = "Upstream service unavailable";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("upstream request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("upstream {url} returned a non-JSON body: {message}")]
    InvalidBody { url: String, message: String },

    #[error("upstream task failed: {0}")]
    Task(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::error(UPSTREAM_UNAVAILABLE)),
        )
            .into_response()
    }
}

/// Shared state of the gateway
#[derive(Clone)]
pub struct GatewayState {
    upstream: Arc<str>,
    agent: ureq::Agent,
}

impl GatewayState {
    /// `upstream` is the base URL of a search service, e.g. `http://localhost:5000`
    pub fn new(upstream: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout_read(timeout)
            .timeout_write(timeout)
            .build();

        Self {
            upstream: Arc::from(upstream.trim_end_matches('/')),
            agent,
        }
    }

    fn search_url(&self, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.upstream, SEARCH_API_PATH, q),
            _ => format!("{}{}", self.upstream, SEARCH_API_PATH),
        }
    }
}

/// Build the gateway router
pub fn routes(state: GatewayState) -> Router {
    Router::new()
        .route(SEARCH_API_PATH, get(forward_search))
        .with_state(state)
}

async fn forward_search(
    State(state): State<GatewayState>,
    RawQuery(query): RawQuery,
) -> Result<Response, GatewayError> {
    let url = state.search_url(query.as_deref());
    tracing::debug!(%url, "forwarding search");

    let agent = state.agent.clone();
    let (status, body) = tokio::task::spawn_blocking(move || fetch_json(&agent, &url))
        .await
        .map_err(|e| GatewayError::Task(e.to_string()))??;

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(body)).into_response())
}

/// GET `url` and decode the body as JSON, whatever the status code
fn fetch_json(agent: &ureq::Agent, url: &str) -> Result<(u16, serde_json::Value), GatewayError> {
    let response = match agent.get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(err)) => {
            return Err(GatewayError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            })
        }
    };

    let status = response.status();
    let body = response
        .into_json::<serde_json::Value>()
        .map_err(|e| GatewayError::InvalidBody {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_keeps_query_verbatim() {
        let state = GatewayState::new("http://localhost:5000/", Duration::from_secs(1));

        assert_eq!(
            state.search_url(Some("case_type=WP%28C%29&case_number=1234&filing_year=2023")),
            "http://localhost:5000/api/cases/search?case_type=WP%28C%29&case_number=1234&filing_year=2023"
        );
        assert_eq!(
            state.search_url(None),
            "http://localhost:5000/api/cases/search"
        );
        assert_eq!(
            state.search_url(Some("")),
            "http://localhost:5000/api/cases/search"
        );
    }
}
