use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/picker", get(handlers::get_picker).post(handlers::change_picker))
        .route("/healthz", get(handlers::healthz))
        .with_state(state)
}
