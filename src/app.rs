use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/feedback", post(handlers::submit_feedback))
        .route("/api/feedback/:id", delete(handlers::delete_feedback))
        .route("/api/feedback/history/:user_id", get(handlers::get_history))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/all_feedback", get(handlers::get_all_feedback))
        .with_state(state)
}
