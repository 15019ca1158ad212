use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/toggle/:row/:user", post(handlers::toggle_form))
        .route("/api/table", get(handlers::get_table))
        .route("/api/scores", get(handlers::get_scores))
        .route("/api/toggle", post(handlers::toggle))
        .with_state(state)
}
