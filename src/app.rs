use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/calendar/:year/:month", get(handlers::calendar))
        .route("/api/statuses", get(handlers::get_statuses))
        .route("/api/stats/:year/:month", get(handlers::get_stats))
        .route("/api/status", put(handlers::put_status))
        .route("/api/key", post(handlers::key))
        .route("/api/hover", post(handlers::hover))
        .route("/api/dialog/open", post(handlers::open_dialog))
        .route("/api/dialog/close", post(handlers::close_dialog))
        .route("/api/dialog/settled", post(handlers::settle_dialog))
        .route("/api/help/open", post(handlers::open_help))
        .route("/api/help/close", post(handlers::close_help))
        .route("/api/export", get(handlers::export))
        .route("/api/import", post(handlers::import))
        .with_state(state)
}
