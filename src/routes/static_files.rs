//! Static File Serving
//!
//! Serves the viewer page (query box, two result columns, tooltip styling)
//! from the `static/` directory.

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::path::PathBuf;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Get the static files directory path
fn get_static_dir() -> PathBuf {
    let paths = [PathBuf::from("static"), PathBuf::from("../static")];

    for path in paths {
        if path.exists() && path.is_dir() {
            info!(path = %path.display(), "Found static files directory");
            return path;
        }
    }

    warn!("Static files directory not found, viewer page unavailable");
    PathBuf::from("static")
}

/// Create router for serving the viewer page and its assets
pub fn router() -> Router {
    let static_dir = get_static_dir();

    let serve_dir = ServeDir::new(&static_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(serve_index))
        .fallback_service(serve_dir)
}

/// Serve the viewer index page
async fn serve_index() -> impl IntoResponse {
    let paths = [
        PathBuf::from("static/index.html"),
        PathBuf::from("../static/index.html"),
    ];

    for path in paths {
        if let Ok(content) = tokio::fs::read_to_string(&path).await {
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                content,
            )
                .into_response();
        }
    }

    let fallback_html = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>imgcomp - API Server</title>
</head>
<body>
    <h1>imgcomp</h1>
    <p>The comparison API is running, but the viewer page was not found.</p>
    <ul>
        <li><code>GET /api/health</code> - Health check</li>
        <li><code>GET /api/compare?query=...</code> - Side-by-side comparison</li>
    </ul>
</body>
</html>"#;

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        fallback_html.to_string(),
    )
        .into_response()
}
