//! Client for the remote script endpoint that stores survey records.

use crate::models::{NewRecord, Record};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("request to remote endpoint failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("remote endpoint returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("remote endpoint did not return JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("remote endpoint returned {0} instead of a record list")]
    NotAList(&'static str),
}

#[derive(Clone)]
pub struct RemoteStorage {
    http: reqwest::Client,
    endpoint: String,
}

impl RemoteStorage {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// `GET <endpoint>`; the body must be a JSON array of records.
    pub async fn fetch_records(&self) -> Result<Vec<Record>, SyncError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status(status));
        }

        let body = response.bytes().await?;
        parse_records(&body)
    }

    /// `POST <endpoint>` with the record as JSON text. The acknowledgement is
    /// opaque, so neither its status nor its body is inspected.
    pub async fn post_record(&self, record: &NewRecord) -> Result<(), SyncError> {
        let body = serde_json::to_string(record)?;
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "remote write acknowledged");
        Ok(())
    }
}

pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, SyncError> {
    let value: Value = serde_json::from_slice(body)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        Value::Object(_) => Err(SyncError::NotAList("an object")),
        Value::String(_) => Err(SyncError::NotAList("a string")),
        Value::Number(_) => Err(SyncError::NotAList("a number")),
        Value::Bool(_) => Err(SyncError::NotAList("a boolean")),
        Value::Null => Err(SyncError::NotAList("null")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_record_array() {
        let body = r#"[
            {"Location": "", "Time": "30분", "Timestamp": "2025-01-01T00:00:00Z"},
            {"Location": "", "Time": "1~2시간"}
        ]"#;
        let records = parse_records(body.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].time, "1~2시간");
    }

    #[test]
    fn error_shaped_body_is_rejected() {
        let err = parse_records(br#"{"error": "Exception: sheet not found"}"#).unwrap_err();
        assert!(matches!(err, SyncError::NotAList("an object")));
    }

    #[test]
    fn html_body_is_rejected() {
        let err = parse_records(b"<!DOCTYPE html><html></html>").unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
    }

    #[test]
    fn array_of_non_records_is_rejected() {
        let err = parse_records(b"[1, 2]").unwrap_err();
        assert!(matches!(err, SyncError::Decode(_)));
    }
}
