use crate::errors::{AppError, LOAD_FAILED, SUBMIT_FAILED};
use crate::export::{to_xlsx, EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::models::{ChartsResponse, RecordsResponse, SubmitRequest, SubmitResponse};
use crate::state::AppState;
use crate::sync;
use crate::ui::render_index;
use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use tracing::info;

const SUBMITTED: &str = "성공적으로 기록되었습니다! 감사합니다. 😊";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let store = state.store.lock().await;
    Html(render_index(&store))
}

pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<RecordsResponse>, AppError> {
    sync::load_records(&state)
        .await
        .map_err(|_| AppError::bad_gateway(LOAD_FAILED))?;

    let store = state.store.lock().await;
    Ok(Json(store.records_response()))
}

pub async fn submit_record(
    State(state): State<AppState>,
    Json(form): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let reloaded = sync::submit_record(&state, &form)
        .await
        .map_err(|_| AppError::bad_gateway(SUBMIT_FAILED))?;

    let listing = if reloaded {
        Some(state.store.lock().await.records_response())
    } else {
        None
    };

    Ok(Json(SubmitResponse {
        message: SUBMITTED.to_string(),
        listing,
    }))
}

pub async fn get_charts(State(state): State<AppState>) -> Json<ChartsResponse> {
    let store = state.store.lock().await;
    Json(store.charts_response())
}

pub async fn export_records(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = {
        let store = state.store.lock().await;
        to_xlsx(store.records())?
    };
    info!(bytes = bytes.len(), "records exported");

    let headers = [
        (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
        ),
    ];
    Ok((headers, bytes))
}
