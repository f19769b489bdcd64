use super::AppState;
use crate::error::AppError;
use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::Response,
};

/// Export every sample as CSV
#[utoipa::path(
    get,
    path = "/samples/export/csv",
    tag = "samples",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv")
    )
)]
pub async fn export_samples_csv(State(app_state): State<AppState>) -> Result<Response, AppError> {
    let csv = app_state.samples()?.export_csv().await?;
    let filename = format!(
        "merobase_samples_{}.csv",
        chrono::Utc::now().format("%Y%m%d")
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", filename),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
}
