use crate::{
    dashboard::{CategoryCount, DashboardStats, MapMarker},
    filter::SampleFilter,
    handlers::{
        samples::{CleanupResponse, NextIdQuery},
        system::{HealthStatus, LoginRequest, LoginResponse},
    },
    models::{
        AntibacterialAssay, Coordinates, Draft, DraftSection, Media, MediaKind, Microbiology,
        Molecular, Morphology, NewSample, ProjectType, Sample, SampleSearch, SampleType,
        SampleUpdate, SequenceFile,
    },
    services::{NextSampleId, UploadedImage},
    wizard::{StepInfo, WizardStep},
};
use axum::response::Html;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // samples
        crate::handlers::samples::create_sample,
        crate::handlers::samples::list_samples,
        crate::handlers::samples::search_samples,
        crate::handlers::samples::sample_stats,
        crate::handlers::samples::next_sample_id,
        crate::handlers::samples::get_sample,
        crate::handlers::samples::update_sample,
        crate::handlers::samples::delete_sample,
        crate::handlers::samples::cleanup_samples,
        crate::handlers::upload::upload_image,
        crate::handlers::export::export_samples_csv,
        // drafts
        crate::handlers::drafts::get_draft,
        crate::handlers::drafts::update_draft_section,
        crate::handlers::drafts::clear_draft,
        crate::handlers::drafts::submit_draft,
        crate::handlers::drafts::wizard_steps,
        // system
        crate::handlers::system::health,
        crate::handlers::system::database_health,
        crate::handlers::system::login,
        crate::handlers::system::system_status,
    ),
    components(
        schemas(
            Sample,
            NewSample,
            SampleUpdate,
            SampleSearch,
            SampleFilter,
            ProjectType,
            SampleType,
            Coordinates,
            Media,
            MediaKind,
            SequenceFile,
            Morphology,
            AntibacterialAssay,
            Microbiology,
            Molecular,
            NextSampleId,
            NextIdQuery,
            UploadedImage,
            CleanupResponse,
            DashboardStats,
            CategoryCount,
            MapMarker,
            Draft,
            DraftSection,
            WizardStep,
            StepInfo,
            HealthStatus,
            LoginRequest,
            LoginResponse,
        )
    ),
    tags(
        (name = "samples", description = "Sample catalogue"),
        (name = "drafts", description = "Wizard drafts"),
        (name = "system", description = "Health and authentication")
    ),
    info(
        title = "MEROBase API",
        version = "0.1.0",
        description = "Coral reef microbiology sample catalogue"
    )
)]
pub struct ApiDoc;

/// Swagger UI page loading `/api-docs/openapi.json`
pub async fn swagger_ui_page() -> Html<&'static str> {
    Html(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset=UTF-8>
  <title>MEROBase API</title>
  <link rel=stylesheet href=https://cdn.jsdelivr.net/npm/swagger-ui-dist@5.11.0/swagger-ui.css>
  <style>
    body { margin: 0; font-family: Arial, sans-serif; }
  </style>
</head>
<body>
  <div id=swagger-ui></div>
  <script src=https://cdn.jsdelivr.net/npm/swagger-ui-dist@5.11.0/swagger-ui-bundle.js></script>
  <script>
    window.onload = function() {
      window.ui = SwaggerUIBundle({
        url: '/api-docs/openapi.json',
        dom_id: '#swagger-ui',
        deepLinking: true,
        validatorUrl: null
      });
    };
  </script>
</body>
</html>"#,
    )
}
