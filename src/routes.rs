use crate::docs::{ApiDoc, swagger_ui_page};
use crate::handlers::{
    AppState, cleanup_samples, clear_draft, create_sample, database_health, delete_sample,
    export_samples_csv, get_draft, get_sample, health, list_samples, login, next_sample_id,
    sample_stats, search_samples, submit_draft, system_status, update_draft_section,
    update_sample, upload_image, wizard_steps,
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::Method,
    routing::{get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use utoipa::OpenApi;

/// Room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .route("/samples", post(create_sample).get(list_samples))
        .route("/samples/search", get(search_samples))
        .route("/samples/stats", get(sample_stats))
        .route("/samples/next-id", get(next_sample_id))
        .route("/samples/export/csv", get(export_samples_csv))
        .route("/samples/cleanup", axum::routing::delete(cleanup_samples))
        .route(
            "/samples/{sample_id}",
            get(get_sample).put(update_sample).delete(delete_sample),
        )
        .route("/samples/{sample_id}/upload", post(upload_image))
        .route("/drafts/{key}", get(get_draft).delete(clear_draft))
        .route("/drafts/{key}/submit", post(submit_draft))
        .route("/drafts/{key}/{section}", patch(update_draft_section))
        .route("/wizard/steps", get(wizard_steps))
        .route("/auth/login", post(login))
}

/// The complete application: API, health checks, OpenAPI document and the
/// static upload directory
pub fn create_app(app_state: AppState) -> Router {
    let storage = &app_state.config.storage;
    let body_limit = storage.max_size as usize + MULTIPART_OVERHEAD;
    let uploads = ServeDir::new(&storage.upload_dir);
    let public_prefix = storage.public_prefix.trim_end_matches('/').to_string();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/status", get(system_status))
        .route("/api/health/db", get(database_health))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/swagger-ui", get(swagger_ui_page))
        .merge(create_api_routes())
        .nest_service(&public_prefix, uploads)
        .with_state(app_state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
