use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Message is required")]
    MessageRequired,

    #[error("Message exceeds {max} characters")]
    MessageTooLong { max: usize },

    /// Unknown, already used or expired login link. The three cases are never told apart.
    #[error("Invalid or expired login token")]
    InvalidOrExpiredToken,

    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Authorization header is not of the form `Bearer <token>`")]
    InvalidAuthorizationFormat,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to send login email: {0}")]
    EmailSendFailed(String),

    #[error("Timed out waiting for {0}")]
    Timeout(&'static str),

    /// The whole request outlived the server's request deadline.
    #[error("Request timed out")]
    RequestTimeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidJson,
    EmailRequired,
    InvalidEmail,
    MessageRequired,
    MessageTooLong,
    InvalidOrExpiredToken,
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    EmailSendFailed,
    RequestTimeout,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::EmailRequired => "email_required",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::MessageRequired => "message_required",
            ErrorCode::MessageTooLong => "message_too_long",
            ErrorCode::InvalidOrExpiredToken => "invalid_or_expired_token",
            ErrorCode::MissingAuthorization => "missing_authorization",
            ErrorCode::InvalidAuthorizationFormat => "invalid_authorization_format",
            ErrorCode::InvalidToken => "invalid_token",
            ErrorCode::EmailSendFailed => "email_send_failed",
            ErrorCode::RequestTimeout => "request_timeout",
            ErrorCode::InternalError => "internal_error",
        }
    }
}

impl AppError {
    /// The code exposed to callers. Storage, lookup and timeout failures all collapse
    /// into `internal_error` so nothing about the failing sub-step leaks out.
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidJson(_) => ErrorCode::InvalidJson,
            AppError::EmailRequired => ErrorCode::EmailRequired,
            AppError::InvalidEmail => ErrorCode::InvalidEmail,
            AppError::MessageRequired => ErrorCode::MessageRequired,
            AppError::MessageTooLong { .. } => ErrorCode::MessageTooLong,
            AppError::InvalidOrExpiredToken => ErrorCode::InvalidOrExpiredToken,
            AppError::MissingAuthorization => ErrorCode::MissingAuthorization,
            AppError::InvalidAuthorizationFormat => ErrorCode::InvalidAuthorizationFormat,
            AppError::InvalidToken(_) => ErrorCode::InvalidToken,
            AppError::EmailSendFailed(_) => ErrorCode::EmailSendFailed,
            AppError::RequestTimeout => ErrorCode::RequestTimeout,
            AppError::Database(_)
            | AppError::UserNotFound
            | AppError::Timeout(_)
            | AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
