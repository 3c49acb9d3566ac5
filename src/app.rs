use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/event", post(handlers::commit_form))
        .route("/api/countdown", get(handlers::get_countdown))
        .route("/api/event", post(handlers::commit))
        .with_state(state)
}
