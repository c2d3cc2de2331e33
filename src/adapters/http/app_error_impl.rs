use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidJson(rejection.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidJson(_)
            | AppError::EmailRequired
            | AppError::InvalidEmail
            | AppError::MessageRequired
            | AppError::MessageTooLong { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidOrExpiredToken
            | AppError::MissingAuthorization
            | AppError::InvalidAuthorizationFormat
            | AppError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::EmailSendFailed(_)
            | AppError::Database(_)
            | AppError::UserNotFound
            | AppError::Timeout(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error before it gets converted into a status response.
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        error_resp(status, self.code())
    }
}

fn error_resp(status: StatusCode, code: ErrorCode) -> Response {
    (status, Json(serde_json::json!({ "error": code.as_str() }))).into_response()
}
