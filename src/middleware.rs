//! Cross-cutting HTTP layers: bsvalias response headers, the request
//! deadline and request logging.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::{set_header::SetResponseHeaderLayer, timeout::TimeoutLayer};
use uuid::Uuid;

use crate::error::ApiError;

pub const SERVER_NAME: &str = "paymail-go";

pub const CAPABILITY_DISCOVERY_CONTENT_TYPE: &str =
    r#"application/json; schema="https://schemas.nchain.com/bsvalias/1.0/capability-discovery""#;

/// Stamp `Server` and the capability-discovery `Content-Type` on every response.
pub fn with_bsvalias_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::SERVER,
            HeaderValue::from_static(SERVER_NAME),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CAPABILITY_DISCOVERY_CONTENT_TYPE),
        ))
}

async fn timeout_error_body(State(timeout): State<Duration>, response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::RequestTimeout(timeout).into_response();
    }
    response
}

/// Abort handlers that run past `timeout` with a 408.
///
/// `TimeoutLayer` answers with an empty body; the outer layer swaps in the
/// usual `{error, code}` JSON.
pub fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(axum::middleware::map_response_with_state(
            timeout,
            timeout_error_body,
        ))
}

/// What is known about a request once its response is ready.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub id: Uuid,
    pub method: String,
    pub url: String,
    pub status: u16,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

/// Receives one record per completed request.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, record: &RequestRecord);
}

/// Emits each record as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, record: &RequestRecord) {
        tracing::info!(
            request_id = %record.id,
            method = %record.method,
            url = %record.url,
            status = record.status,
            duration = ?record.duration,
            "served request"
        );
    }
}

async fn log_request(
    State(observer): State<Arc<dyn RequestObserver>>,
    request: Request,
    next: Next,
) -> Response {
    let started_at = Utc::now();
    let start = Instant::now();
    let method = request.method().to_string();
    let url = request.uri().to_string();

    let response = next.run(request).await;

    observer.on_request(&RequestRecord {
        id: Uuid::new_v4(),
        method,
        url,
        status: response.status().as_u16(),
        started_at,
        duration: start.elapsed(),
    });

    response
}

/// Wrap `router` so `observer` sees every request it serves.
pub fn with_request_logging<S>(router: Router<S>, observer: Arc<dyn RequestObserver>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(axum::middleware::from_fn_with_state(observer, log_request))
}
