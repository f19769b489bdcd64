pub mod drafts;
pub mod export;
pub mod samples;
pub mod system;
pub mod upload;

pub use drafts::{clear_draft, get_draft, submit_draft, update_draft_section, wizard_steps};
pub use export::export_samples_csv;
pub use samples::{
    cleanup_samples, create_sample, delete_sample, get_sample, list_samples, next_sample_id,
    sample_stats, search_samples, update_sample,
};
pub use system::{database_health, health, login, system_status};
pub use upload::upload_image;

use crate::{
    config::Config,
    draft::DraftService,
    error::{AppError, AppResult},
    services::SampleService,
};
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    /// `None` when the database could not be reached at start-up
    pub samples: Option<SampleService>,
    pub drafts: DraftService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn samples(&self) -> AppResult<&SampleService> {
        self.samples
            .as_ref()
            .ok_or_else(|| AppError::service_unavailable("sample database is unavailable"))
    }
}
