use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform JSON envelope for every API response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Business response code (mirrors the HTTP status for 2xx/4xx)
    pub code: i32,
    /// Human readable message
    pub msg: String,
    /// Payload
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T) -> Self {
        Self {
            code: ResponseCode::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, msg: String) -> Self {
        Self {
            code: ResponseCode::SUCCESS,
            msg,
            data: Some(data),
        }
    }

    pub fn created(data: T) -> Self {
        Self {
            code: ResponseCode::CREATED,
            msg: "created".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: String) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg,
            data: None,
        }
    }

    pub fn error_with_data(code: i32, msg: String, data: T) -> Self {
        Self {
            code,
            msg,
            data: Some(data),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = match self.code {
            ResponseCode::SUCCESS => StatusCode::OK,
            ResponseCode::CREATED => StatusCode::CREATED,
            ResponseCode::BAD_REQUEST => StatusCode::BAD_REQUEST,
            ResponseCode::UNAUTHORIZED => StatusCode::UNAUTHORIZED,
            ResponseCode::NOT_FOUND => StatusCode::NOT_FOUND,
            ResponseCode::CONFLICT => StatusCode::CONFLICT,
            ResponseCode::FILE_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            ResponseCode::UNSUPPORTED_FILE_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ResponseCode::SERVICE_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(self)).into_response()
    }
}

/// Business response codes
pub struct ResponseCode;

impl ResponseCode {
    pub const SUCCESS: i32 = 200;
    pub const CREATED: i32 = 201;

    /// Client errors 4xx
    pub const BAD_REQUEST: i32 = 400;
    pub const UNAUTHORIZED: i32 = 401;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const FILE_TOO_LARGE: i32 = 413;
    pub const UNSUPPORTED_FILE_TYPE: i32 = 415;

    /// Server errors 5xx
    pub const INTERNAL_ERROR: i32 = 500;
    pub const DATABASE_ERROR: i32 = 501;
    pub const STORAGE_ERROR: i32 = 502;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

impl ResponseCode {
    pub fn get_message(code: i32) -> &'static str {
        match code {
            Self::SUCCESS => "ok",
            Self::CREATED => "created",
            Self::BAD_REQUEST => "bad request",
            Self::UNAUTHORIZED => "unauthorized",
            Self::NOT_FOUND => "not found",
            Self::CONFLICT => "conflict",
            Self::FILE_TOO_LARGE => "file too large",
            Self::UNSUPPORTED_FILE_TYPE => "unsupported file type",
            Self::INTERNAL_ERROR => "internal server error",
            Self::DATABASE_ERROR => "database error",
            Self::STORAGE_ERROR => "storage error",
            Self::SERVICE_UNAVAILABLE => "service unavailable",
            _ => "unknown error",
        }
    }
}
