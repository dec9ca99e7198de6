//! Comparison endpoint — the relay between the viewer page and the two
//! search backends.

use axum::{
    extract::{Query, State},
    response::Json as ResponseJson,
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::models::{AppState, ComparisonResponse};

/// Request parameters whose name starts with this prefix are forwarded
/// verbatim to the left upstream, as an escape hatch for relevance
/// weighting experiments (e.g. `cirrusQualW`).
const PASSTHROUGH_PREFIX: &str = "cirrus";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/compare", get(get_comparison))
        .with_state(state)
}

/// Run one side-by-side comparison.
///
/// This never returns an error status: upstream failures degrade to an
/// empty list for the affected side, so the response body always has the
/// `left`/`right` shape.
async fn get_comparison(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ResponseJson<ComparisonResponse> {
    let query = params
        .iter()
        .find(|(k, _)| k == "query")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();

    let passthrough: Vec<(String, String)> = params
        .into_iter()
        .filter(|(k, _)| k.starts_with(PASSTHROUGH_PREFIX))
        .collect();

    info!(query = %query, passthrough = passthrough.len(), "comparison requested");

    let response = state.search.compare(&query, &passthrough).await;

    info!(
        left = response.left.len(),
        right = response.right.len(),
        "comparison completed"
    );

    Json(response)
}
