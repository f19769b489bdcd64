use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::{ApiResponse, ResponseCode};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("file too large: maximum allowed size is {max_size} bytes")]
    FileTooLarge { max_size: u64 },

    #[error("unsupported file type: {file_type}")]
    UnsupportedFileType { file_type: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("conflict: {0}")]
    Conflict(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Unexpected failures carry the raw message; nothing is redacted.
        let (code, message) = match &self {
            AppError::Database(e) => (ResponseCode::DATABASE_ERROR, e.to_string()),
            AppError::Serialization(e) => (ResponseCode::INTERNAL_ERROR, e.to_string()),
            AppError::Io(e) => (ResponseCode::INTERNAL_ERROR, e.to_string()),
            AppError::Csv(e) => (ResponseCode::INTERNAL_ERROR, e.to_string()),
            AppError::Config(msg) => (ResponseCode::INTERNAL_ERROR, msg.clone()),
            AppError::Validation(msg) => (ResponseCode::BAD_REQUEST, msg.clone()),
            AppError::Storage(msg) => (ResponseCode::STORAGE_ERROR, msg.clone()),
            AppError::FileTooLarge { max_size } => (
                ResponseCode::FILE_TOO_LARGE,
                format!("file too large, maximum allowed size is {} bytes", max_size),
            ),
            AppError::UnsupportedFileType { file_type } => (
                ResponseCode::UNSUPPORTED_FILE_TYPE,
                format!("unsupported file type: {}", file_type),
            ),
            AppError::Internal(e) => (ResponseCode::INTERNAL_ERROR, e.to_string()),
            AppError::BadRequest(msg) => (ResponseCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (ResponseCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound { resource } => (ResponseCode::NOT_FOUND, resource.clone()),
            AppError::Conflict(msg) => (ResponseCode::CONFLICT, msg.clone()),
        };

        if code >= ResponseCode::INTERNAL_ERROR {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }

        ApiResponse::<()>::error(code, message).into_response()
    }
}

/// Application result alias
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    pub fn bad_request<T: Into<String>>(msg: T) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(resource: T) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn service_unavailable<T: Into<String>>(msg: T) -> Self {
        Self::Internal(anyhow::anyhow!(msg.into()))
    }

    pub fn file_too_large(max_size: u64) -> Self {
        Self::FileTooLarge { max_size }
    }

    pub fn unsupported_file_type<T: Into<String>>(file_type: T) -> Self {
        Self::UnsupportedFileType {
            file_type: file_type.into(),
        }
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        Self::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Maps a unique-index violation on insert/update to a conflict; everything
    /// else stays a database error.
    pub fn from_write(err: sqlx::Error, sample_id: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return Self::conflict(format!("sample {} already exists", sample_id));
            }
        }
        Self::Database(err)
    }
}
