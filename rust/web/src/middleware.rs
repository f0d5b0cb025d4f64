use std::time::Instant;
use warp::http::StatusCode;
use warp::reject::Rejection;
use warp::reply::Response;
use warp::Filter;

/// Middleware for logging HTTP requests and responses.
///
/// Logs method and path on arrival, then status and duration once the wrapped
/// filter has produced a response.
pub fn with_request_logging<F>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (Response,), Error = Rejection> + Clone + Send + Sync + 'static,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: warp::path::FullPath, method: warp::http::Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            RequestStart {
                path: path.as_str().to_string(),
                method: method.to_string(),
                at: Instant::now(),
            }
        })
        .and(filter)
        .map(|start: RequestStart, response: Response| {
            let metrics = RequestMetrics::new(
                start.path,
                start.method,
                response.status().as_u16(),
                start.at.elapsed().as_millis(),
            );
            log_response(
                response.status(),
                &metrics.path,
                &metrics.method,
                metrics.duration_ms,
            );
            metrics.log();
            response
        })
}

struct RequestStart {
    path: String,
    method: String,
    at: Instant,
}

/// Log response with status code
pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    if status.is_success() {
        tracing::info!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "client error"
        );
    } else if status.is_server_error() {
        tracing::error!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "server error"
        );
    } else {
        tracing::info!(
            status = %status.as_u16(),
            path = %path,
            method = %method,
            duration_ms = duration_ms,
            "response sent"
        );
    }
}

/// Performance metrics collection
#[derive(Debug, Clone)]
pub struct RequestMetrics {
    pub path: String,
    pub method: String,
    pub status: u16,
    pub duration_ms: u128,
}

impl RequestMetrics {
    pub fn new(path: String, method: String, status: u16, duration_ms: u128) -> Self {
        Self {
            path,
            method,
            status,
            duration_ms,
        }
    }

    pub fn log(&self) {
        tracing::debug!(
            path = %self.path,
            method = %self.method,
            status = self.status,
            duration_ms = self.duration_ms,
            "request metrics"
        );
    }
}
