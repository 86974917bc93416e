pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use state::AppState;

/// The full HTTP surface: health, then the same route set for every mode.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/{mode}/symptoms", get(routes::triage::list_symptoms))
        .route("/{mode}/process_tier1", post(routes::triage::process_tier1))
        .route("/{mode}/process_tier2", post(routes::triage::process_tier2))
        .route("/{mode}/process_tier3", post(routes::triage::process_tier3))
        .route("/{mode}/diagnose", post(routes::triage::diagnose))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
