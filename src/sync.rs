use crate::models::SubmitRequest;
use crate::state::AppState;
use crate::storage::SyncError;
use crate::survey::build_record;
use tracing::{error, info, warn};

/// Fetches every record and replaces the cache. On failure the cache is marked
/// failed and the error is returned to the caller.
pub async fn load_records(state: &AppState) -> Result<usize, SyncError> {
    match state.remote.fetch_records().await {
        Ok(records) => {
            let count = records.len();
            state.store.lock().await.replace(records);
            info!(count, "records loaded");
            Ok(count)
        }
        Err(err) => {
            error!(error = %err, endpoint = state.remote.endpoint(), "failed to load records");
            state.store.lock().await.fail(err.to_string());
            Err(err)
        }
    }
}

/// Builds a record from the form, writes it and refreshes the cache.
///
/// Only a failed write is an error. The returned flag says whether the
/// follow-up reload succeeded; its failure is already recorded in the store.
pub async fn submit_record(state: &AppState, form: &SubmitRequest) -> Result<bool, SyncError> {
    let record = build_record(form);
    state.remote.post_record(&record).await.inspect_err(|err| {
        error!(error = %err, "failed to submit record");
    })?;
    info!(activity = %record.activity, time = %record.time, "record submitted");

    match load_records(state).await {
        Ok(_) => Ok(true),
        Err(err) => {
            warn!(error = %err, "reload after submit failed");
            Ok(false)
        }
    }
}
