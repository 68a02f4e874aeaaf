//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: backend wiring (in-memory vs Postgres/Redis) behind `AppServices`
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses and the `{message, data}` envelope

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The API prefix is configurable via `API_PREFIX` (default `/api/v1`);
/// `/health` always lives at the root.
pub async fn build_app() -> Router {
    let services = Arc::new(services::build_services().await);
    build_app_with_services(services)
}

/// Router construction split out so tests can inject their own backend.
pub fn build_app_with_services(services: Arc<services::AppServices>) -> Router {
    let prefix = std::env::var("API_PREFIX").unwrap_or_else(|_| "/api/v1".to_string());

    let api = routes::router().layer(Extension(services));

    let app = Router::new().route("/health", get(routes::system::health));
    if prefix.is_empty() {
        app.merge(api)
    } else {
        app.nest(&prefix, api)
    }
}
