use axum::Router;
use tower_http::cors::CorsLayer;

/// Allow cross-origin requests from any origin.
pub fn add<S: Clone + Send + Sync + 'static>(router: Router<S>) -> Router<S> {
    router.layer(CorsLayer::permissive())
}
