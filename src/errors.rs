use crate::export::ExportError;
use axum::http::StatusCode;

pub const LOAD_FAILED: &str = "데이터를 불러오는 데 실패했습니다. 설정을 확인하세요.";
pub const SUBMIT_FAILED: &str = "기록 저장에 실패했습니다. 인터넷 연결 및 스크립트 URL을 확인하세요.";
pub const NOTHING_TO_EXPORT: &str = "내보낼 데이터가 없습니다.";

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Empty => Self::conflict(NOTHING_TO_EXPORT),
            other => Self::internal(other),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
