// CORS configuration
// The viewer page is served from the same origin, but the comparison
// endpoint stays open so experiment pages hosted elsewhere can call it.

use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub fn apply_cors(router: Router) -> Router {
    router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
