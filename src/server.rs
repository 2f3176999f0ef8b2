use crate::{app_state::AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes and middleware
///
/// Shared by main.rs and the integration tests.
pub fn create_app(app_state: AppState) -> Router {
    use handlers::{fetch_product, health, not_found, test_connection};

    Router::new()
        .route("/products/fetch", post(fetch_product))
        .route("/connection/test", post(test_connection))
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
