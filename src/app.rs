use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/records",
            get(handlers::list_records).post(handlers::submit_record),
        )
        .route("/api/charts", get(handlers::get_charts))
        .route("/export.xlsx", get(handlers::export_records))
        .with_state(state)
}
