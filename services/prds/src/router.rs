use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use prdgen_core::health::healthz;
use prdgen_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    generate::{generate_and_create_prd, generate_content},
    health::readyz,
    prd::{create_prd, delete_prd, get_prd, list_prds, update_prd_content},
    webhook::identity_webhook,
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.request_timeout();
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Generation
        .route("/generate", post(generate_content))
        .route("/prds/generate", post(generate_and_create_prd))
        // PRDs
        .route("/prds", get(list_prds))
        .route("/prds", post(create_prd))
        .route("/prds/{id}", get(get_prd))
        .route("/prds/{id}", patch(update_prd_content))
        .route("/prds/{id}", delete(delete_prd))
        // Identity sync
        .route("/webhooks/identity", post(identity_webhook))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(request_timeout_layer(request_timeout)),
        )
        .with_state(state)
}

/// Whole-request bound; requests still running when it elapses get a 408.
fn request_timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
