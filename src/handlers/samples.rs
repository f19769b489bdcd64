use super::AppState;
use crate::{
    dashboard::DashboardStats,
    error::AppError,
    filter::SampleFilter,
    models::{
        NewSample, ProjectType, Sample, SampleSearch, SampleUpdate, deserialize_string_to_i32,
    },
    response::ApiResponse,
    services::NextSampleId,
};
use axum::{
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextIdQuery {
    #[serde(alias = "projectSample")]
    pub project_type: ProjectType,
    #[serde(deserialize_with = "deserialize_string_to_i32")]
    pub project_number: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub deleted_count: usize,
    pub deleted_sample_ids: Vec<String>,
}

/// Body errors are validation errors, not axum's default 422
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Register a sample. The identifier is derived from the project and sample
/// numbers; without `sampleNumber` the next free number is used.
#[utoipa::path(
    post,
    path = "/samples",
    tag = "samples",
    request_body = NewSample,
    responses(
        (status = 201, description = "Sample created", body = Sample),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Identifier already in use")
    )
)]
pub async fn create_sample(
    State(app_state): State<AppState>,
    body: Result<Json<NewSample>, JsonRejection>,
) -> Result<ApiResponse<Sample>, AppError> {
    let new = json_body(body)?;
    let sample = app_state.samples()?.register(new).await?;
    Ok(ApiResponse::created(sample))
}

/// List samples in registration order, optionally filtered
#[utoipa::path(
    get,
    path = "/samples",
    tag = "samples",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive substring over the text fields"),
        ("kingdom" = Option<String>, Query, description = "Exact kingdom, `All` for any"),
        ("projectType" = Option<String>, Query, description = "A or B, `All` for any"),
        ("sampleType" = Option<String>, Query, description = "Biological or Non-Biological, `All` for any"),
        ("dateFrom" = Option<String>, Query, description = "Inclusive start date, YYYY-MM-DD"),
        ("dateTo" = Option<String>, Query, description = "Inclusive end date, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Matching samples", body = [Sample])
    )
)]
pub async fn list_samples(
    State(app_state): State<AppState>,
    Query(filter): Query<SampleFilter>,
) -> Result<Json<ApiResponse<Vec<Sample>>>, AppError> {
    let samples = app_state.samples()?.list(&filter).await?;
    Ok(Json(ApiResponse::success(samples)))
}

/// Field search: identity fields match exactly, descriptive fields by substring
#[utoipa::path(
    get,
    path = "/samples/search",
    tag = "samples",
    params(
        ("sampleId" = Option<String>, Query, description = "Exact composite identifier"),
        ("projectType" = Option<ProjectType>, Query, description = "Exact project type"),
        ("projectNumber" = Option<i32>, Query, description = "Exact project number"),
        ("sampleNumber" = Option<i32>, Query, description = "Exact sample number"),
        ("sampleType" = Option<String>, Query, description = "Exact sample type"),
        ("sampleName" = Option<String>, Query, description = "Substring"),
        ("kingdom" = Option<String>, Query, description = "Substring"),
        ("family" = Option<String>, Query, description = "Substring"),
        ("genus" = Option<String>, Query, description = "Substring"),
        ("species" = Option<String>, Query, description = "Substring"),
        ("diveSite" = Option<String>, Query, description = "Substring"),
        ("collectorName" = Option<String>, Query, description = "Substring")
    ),
    responses(
        (status = 200, description = "Matching samples", body = [Sample])
    )
)]
pub async fn search_samples(
    State(app_state): State<AppState>,
    Query(search): Query<SampleSearch>,
) -> Result<Json<ApiResponse<Vec<Sample>>>, AppError> {
    let samples = app_state.samples()?.search(&search).await?;
    Ok(Json(ApiResponse::success(samples)))
}

#[utoipa::path(
    get,
    path = "/samples/stats",
    tag = "samples",
    responses(
        (status = 200, description = "Dashboard aggregates", body = DashboardStats)
    )
)]
pub async fn sample_stats(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, AppError> {
    let stats = app_state.samples()?.stats().await?;
    Ok(Json(ApiResponse::success(stats)))
}

/// Preview the identifier the next sample of a project would get
#[utoipa::path(
    get,
    path = "/samples/next-id",
    tag = "samples",
    params(
        ("projectType" = ProjectType, Query, description = "A or B"),
        ("projectNumber" = i32, Query, description = "1-999")
    ),
    responses(
        (status = 200, description = "Next identifier", body = NextSampleId),
        (status = 400, description = "Project number out of range")
    )
)]
pub async fn next_sample_id(
    State(app_state): State<AppState>,
    Query(query): Query<NextIdQuery>,
) -> Result<Json<ApiResponse<NextSampleId>>, AppError> {
    let next = app_state
        .samples()?
        .next_sample_id(query.project_type, query.project_number)
        .await?;
    Ok(Json(ApiResponse::success(next)))
}

#[utoipa::path(
    get,
    path = "/samples/{sample_id}",
    tag = "samples",
    params(
        ("sample_id" = String, Path, description = "Composite identifier, e.g. A-001-007")
    ),
    responses(
        (status = 200, description = "Sample", body = Sample),
        (status = 404, description = "Unknown identifier")
    )
)]
pub async fn get_sample(
    State(app_state): State<AppState>,
    Path(sample_id): Path<String>,
) -> Result<Json<ApiResponse<Sample>>, AppError> {
    let sample = app_state.samples()?.get(&sample_id).await?;
    Ok(Json(ApiResponse::success(sample)))
}

/// Partial update. Changing a number renames the sample.
#[utoipa::path(
    put,
    path = "/samples/{sample_id}",
    tag = "samples",
    params(
        ("sample_id" = String, Path, description = "Composite identifier")
    ),
    request_body = SampleUpdate,
    responses(
        (status = 200, description = "Updated sample", body = Sample),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown identifier"),
        (status = 409, description = "New identifier already in use")
    )
)]
pub async fn update_sample(
    State(app_state): State<AppState>,
    Path(sample_id): Path<String>,
    body: Result<Json<SampleUpdate>, JsonRejection>,
) -> Result<Json<ApiResponse<Sample>>, AppError> {
    let update = json_body(body)?;
    let sample = app_state.samples()?.update(&sample_id, update).await?;
    Ok(Json(ApiResponse::success(sample)))
}

#[utoipa::path(
    delete,
    path = "/samples/{sample_id}",
    tag = "samples",
    params(
        ("sample_id" = String, Path, description = "Composite identifier")
    ),
    responses(
        (status = 200, description = "Deleted sample", body = Sample),
        (status = 404, description = "Unknown identifier")
    )
)]
pub async fn delete_sample(
    State(app_state): State<AppState>,
    Path(sample_id): Path<String>,
) -> Result<Json<ApiResponse<Sample>>, AppError> {
    let sample = app_state.samples()?.remove(&sample_id).await?;
    Ok(Json(ApiResponse::success_with_message(
        sample,
        format!("sample {} deleted", sample_id),
    )))
}

/// Delete every sample missing a name or a kingdom
#[utoipa::path(
    delete,
    path = "/samples/cleanup",
    tag = "samples",
    responses(
        (status = 200, description = "Removed identifiers", body = CleanupResponse)
    )
)]
pub async fn cleanup_samples(
    State(app_state): State<AppState>,
) -> Result<Json<ApiResponse<CleanupResponse>>, AppError> {
    let removed = app_state.samples()?.cleanup().await?;
    Ok(Json(ApiResponse::success(CleanupResponse {
        deleted_count: removed.len(),
        deleted_sample_ids: removed.into_iter().map(|s| s.sample_id).collect(),
    })))
}
