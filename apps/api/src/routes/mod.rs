pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::keywords::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::index_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/generate-keywords",
            get(handlers::handle_generate_get).post(handlers::handle_generate_post),
        )
        .route("/n8n-webhook", post(handlers::handle_webhook))
        .route("/batch-keywords", post(handlers::handle_batch))
        .with_state(state)
}
