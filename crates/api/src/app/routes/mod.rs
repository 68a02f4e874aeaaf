use axum::Router;

pub mod products;
pub mod system;

/// Router for all API endpoints (nested under the configured prefix).
pub fn router() -> Router {
    Router::new().nest("/product", products::router())
}
