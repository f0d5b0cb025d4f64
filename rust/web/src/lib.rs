//! HTTP front end for the Arcana draw engine.
//!
//! Serves spreads, readings and card images over warp. Readings go through an
//! [`arcana_oracle::Oracle`] shared by every request.

pub mod errors;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod server;
pub mod static_handler;

pub use errors::{ApiError, ErrorResponse, ErrorSeverity, IntoErrorResponse};
pub use handlers::CreateReadingRequest;
pub use logging::{init_logging, LogEntry, TestLogSubscriber};
pub use middleware::{log_response, with_request_logging, RequestMetrics};
pub use server::{AppContext, ServerConfig, ServerError, ServerHandle, WebServer};
pub use static_handler::{StaticError, StaticHandler};
