// imgcomp - side-by-side image search comparison for CirrusSearch
// relevance experiments

pub mod config;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
