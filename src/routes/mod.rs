//! API Routes
//!
//! This module organizes all HTTP endpoints:
//! - `/api/compare` - Side-by-side comparison of the two search backends
//! - `/api/health` - Health check
//! - `/` - Static file serving (viewer page)

pub mod compare;
pub mod health;
pub mod static_files;

use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware;
use crate::models::AppState;

/// Create the main application router
///
/// API routes are prefixed with `/api/` and take precedence over static
/// files, which are served from root `/`.
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let api_router = Router::new()
        .merge(compare::router(state.clone()))
        .merge(health::router(state));

    let router = Router::new()
        .merge(api_router)
        .merge(static_files::router())
        .layer(TraceLayer::new_for_http());

    middleware::cors::apply_cors(router)
}
