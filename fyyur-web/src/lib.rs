//! fyyur-web library - venue, artist and show booking directory
//!
//! Handlers answer with JSON page payloads; every page payload carries the
//! pending flash messages under `messages`.

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::time::Duration;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub mod api;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod query;

pub use error::{ApiError, ApiResult};

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Service startup time, reported by the health endpoint
    pub startup_time: DateTime<Utc>,
    /// Upper bound for handling a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            startup_time: Utc::now(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.request_timeout;

    Router::new()
        .route("/", get(api::home))
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CatchPanicLayer::custom(api::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
