use super::AppState;
use crate::{
    error::AppError,
    models::MediaKind,
    response::ApiResponse,
    services::{ImageUpload, UploadedImage},
};
use axum::{
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::StatusCode,
    response::Json,
};

const FILE_FIELD: &str = "image";
const KIND_FIELD: &str = "kind";

fn multipart_error(e: MultipartError, max_size: u64) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::file_too_large(max_size)
    } else {
        AppError::bad_request(format!("malformed upload: {}", e.body_text()))
    }
}

/// Attach an image to a sample
///
/// Multipart form with the file in `image` and an optional `kind` choosing the
/// slot (`image`, `samplePhoto`, `sem`, `microscope`, `gel`,
/// `isolatedMorphology`).
#[utoipa::path(
    post,
    path = "/samples/{sample_id}/upload",
    tag = "samples",
    params(
        ("sample_id" = String, Path, description = "Composite identifier")
    ),
    request_body(content = String, content_type = "multipart/form-data", description = "`image` file and optional `kind`"),
    responses(
        (status = 200, description = "Image stored and linked", body = UploadedImage),
        (status = 400, description = "No file or empty file"),
        (status = 404, description = "Unknown identifier"),
        (status = 413, description = "File too large"),
        (status = 415, description = "Not an image")
    )
)]
pub async fn upload_image(
    State(app_state): State<AppState>,
    Path(sample_id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedImage>>, AppError> {
    let samples = app_state.samples()?;
    let max_size = app_state.config.storage.max_size;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut kind = MediaKind::Image;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_size))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            FILE_FIELD => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?;
                file = Some((filename, data.to_vec()));
            }
            KIND_FIELD => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_size))?;
                kind = value.parse()?;
            }
            other => tracing::debug!("ignoring multipart field {:?}", other),
        }
    }

    let Some((filename, data)) = file else {
        // an unknown sample is reported before the missing file
        samples.get(&sample_id).await?;
        return Err(AppError::bad_request(format!(
            "no file uploaded in field \"{}\"",
            FILE_FIELD
        )));
    };

    let uploaded = samples
        .attach_image(
            &sample_id,
            ImageUpload {
                kind,
                filename,
                data,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(uploaded)))
}
