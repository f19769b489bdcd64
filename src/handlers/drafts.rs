use super::AppState;
use crate::{
    error::AppError,
    models::{Draft, DraftSection, Sample},
    response::ApiResponse,
    wizard::{self, StepInfo},
};
use axum::{
    extract::{Path, State, rejection::JsonRejection},
    response::Json,
};
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/drafts/{key}",
    tag = "drafts",
    params(("key" = String, Path, description = "Draft key, [A-Za-z0-9_-]{1,64}")),
    responses(
        (status = 200, description = "Stored draft or the empty skeleton", body = Draft),
        (status = 400, description = "Invalid key")
    )
)]
pub async fn get_draft(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Draft>>, AppError> {
    let draft = app_state.drafts.read(&key).await?;
    Ok(Json(ApiResponse::success(draft)))
}

/// Merge a partial object into one section of the draft
#[utoipa::path(
    patch,
    path = "/drafts/{key}/{section}",
    tag = "drafts",
    params(
        ("key" = String, Path, description = "Draft key"),
        ("section" = DraftSection, Path, description = "metadata, morphology, microbiology, molecular or publication")
    ),
    request_body(content = serde_json::Value, description = "Keys replacing those of the section"),
    responses(
        (status = 200, description = "Draft after the merge", body = Draft),
        (status = 400, description = "Body is not a JSON object"),
        (status = 404, description = "Unknown section")
    )
)]
pub async fn update_draft_section(
    State(app_state): State<AppState>,
    Path((key, section)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<Draft>>, AppError> {
    let section: DraftSection = section.parse()?;
    let partial = match body {
        Ok(Json(Value::Object(map))) => map,
        Ok(_) => return Err(AppError::bad_request("draft section body must be a JSON object")),
        Err(rejection) => return Err(AppError::bad_request(rejection.body_text())),
    };

    let draft = app_state
        .drafts
        .update_section(&key, section, partial)
        .await?;
    Ok(Json(ApiResponse::success(draft)))
}

#[utoipa::path(
    delete,
    path = "/drafts/{key}",
    tag = "drafts",
    params(("key" = String, Path, description = "Draft key")),
    responses(
        (status = 200, description = "Draft removed; the empty skeleton is returned", body = Draft)
    )
)]
pub async fn clear_draft(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Draft>>, AppError> {
    app_state.drafts.clear(&key).await?;
    Ok(Json(ApiResponse::success(Draft::default())))
}

/// Register the draft as a sample and clear it. A draft that fails
/// validation is kept as is.
#[utoipa::path(
    post,
    path = "/drafts/{key}/submit",
    tag = "drafts",
    params(("key" = String, Path, description = "Draft key")),
    responses(
        (status = 201, description = "Sample created", body = Sample),
        (status = 400, description = "Draft is incomplete or invalid"),
        (status = 409, description = "Identifier already in use")
    )
)]
pub async fn submit_draft(
    State(app_state): State<AppState>,
    Path(key): Path<String>,
) -> Result<ApiResponse<Sample>, AppError> {
    let samples = app_state.samples()?;
    let draft = app_state.drafts.read(&key).await?;
    let new = draft.to_new_sample()?;
    let sample = samples.register(new).await?;

    app_state.drafts.clear(&key).await?;
    tracing::info!("draft {} submitted as {}", key, sample.sample_id);
    Ok(ApiResponse::created(sample))
}

#[utoipa::path(
    get,
    path = "/wizard/steps",
    tag = "drafts",
    responses(
        (status = 200, description = "Wizard steps in order", body = [StepInfo])
    )
)]
pub async fn wizard_steps() -> Json<ApiResponse<Vec<StepInfo>>> {
    Json(ApiResponse::success(wizard::steps()))
}
