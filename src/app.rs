use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::submit))
        .route("/reset", post(handlers::reset))
        .route("/api/predict", post(handlers::api_predict))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}
