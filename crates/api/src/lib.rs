#![forbid(unsafe_code)]

//! HTTP surface: course generation, the topic list, and the static course
//! documents.

pub mod error;
pub mod handlers;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, header};
use axum::routing::{get, post};
use services::GenerationService;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use handlers::{GenerateRequest, GenerateResponse, TopicGroupBody, TopicOption};

/// Build the application router.
///
/// `courses_dir` is served under `/courses`. Every response not already
/// carrying a `Cache-Control` header is marked `no-store`.
pub fn router(service: Arc<GenerationService>, courses_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/api/generate", post(handlers::generate))
        .route("/api/topics", get(handlers::topics))
        .nest_service("/courses", ServeDir::new(courses_dir.as_ref()))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}
