pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;
use crate::topics;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/topics", get(topics::topics_handler))
        .route("/api/interview/start", post(handlers::handle_start))
        .route("/api/interview/answer", post(handlers::handle_answer))
        .with_state(state)
}
