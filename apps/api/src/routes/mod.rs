pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::compliance::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/compliance/check",
            post(handlers::handle_check),
        )
        .with_state(state)
}
