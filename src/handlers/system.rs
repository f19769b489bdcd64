use super::AppState;
use crate::{
    error::AppError,
    response::{ApiResponse, ResponseCode},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl HealthStatus {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: chrono::Utc::now(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub username: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up", body = HealthStatus))
)]
pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::success(HealthStatus::new("ok")))
}

#[utoipa::path(
    get,
    path = "/api/health/db",
    tag = "system",
    responses(
        (status = 200, description = "Database reachable", body = HealthStatus),
        (status = 503, description = "Database unavailable", body = HealthStatus)
    )
)]
pub async fn database_health(State(app_state): State<AppState>) -> ApiResponse<HealthStatus> {
    let Some(samples) = app_state.samples.as_ref() else {
        return ApiResponse::error_with_data(
            ResponseCode::SERVICE_UNAVAILABLE,
            "database is not configured".to_string(),
            HealthStatus::new("unavailable"),
        );
    };

    match samples.health_check().await {
        Ok(true) => ApiResponse::success(HealthStatus::new("ok")),
        Ok(false) => ApiResponse::error_with_data(
            ResponseCode::SERVICE_UNAVAILABLE,
            "database health check failed".to_string(),
            HealthStatus::new("unavailable"),
        ),
        Err(e) => {
            tracing::error!("database health check failed: {}", e);
            ApiResponse::error_with_data(
                ResponseCode::SERVICE_UNAVAILABLE,
                e.to_string(),
                HealthStatus::new("unavailable"),
            )
        }
    }
}

/// Check the configured credentials. No session is created.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "system",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Wrong username or password")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let Json(request) = body.map_err(|e| AppError::bad_request(e.body_text()))?;
    let auth = &app_state.config.auth;

    if request.username != auth.username || request.password != auth.password {
        tracing::warn!("failed login for {:?}", request.username);
        return Err(AppError::unauthorized("invalid username or password"));
    }

    tracing::info!("user {} logged in", request.username);
    Ok(Json(ApiResponse::success(LoginResponse {
        username: request.username,
    })))
}

/// Availability of each backing component
#[utoipa::path(
    get,
    path = "/status",
    tag = "system",
    responses((status = 200, description = "Component availability"))
)]
pub async fn system_status(
    State(app_state): State<AppState>,
) -> Json<ApiResponse<BTreeMap<&'static str, &'static str>>> {
    let mut status = BTreeMap::new();
    status.insert(
        "database",
        if app_state.samples.is_some() {
            "available"
        } else {
            "unavailable"
        },
    );
    status.insert("drafts", "available");
    status.insert(
        "sampleStore",
        if app_state.config.database.in_memory {
            "in-memory"
        } else {
            "postgres"
        },
    );

    Json(ApiResponse::success(status))
}
