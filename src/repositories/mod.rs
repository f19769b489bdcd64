pub mod memory;
pub mod sample;

pub use memory::MemorySampleStore;
pub use sample::SampleRepository;

use crate::error::AppResult;
use crate::models::{ProjectType, Sample, SampleSearch};
use uuid::Uuid;

/// Sample persistence. Implementations enforce uniqueness of `sample_id` and
/// report violations as [`crate::error::AppError::Conflict`].
#[async_trait::async_trait]
pub trait SampleStore: Send + Sync {
    async fn insert(&self, sample: &Sample) -> AppResult<Sample>;

    async fn find_by_sample_id(&self, sample_id: &str) -> AppResult<Option<Sample>>;

    /// All samples, oldest first
    async fn list(&self) -> AppResult<Vec<Sample>>;

    async fn list_by_project(
        &self,
        project_type: ProjectType,
        project_number: i32,
    ) -> AppResult<Vec<Sample>>;

    async fn search(&self, search: &SampleSearch) -> AppResult<Vec<Sample>>;

    /// Overwrites the record with the given primary key
    async fn replace(&self, id: Uuid, sample: &Sample) -> AppResult<Sample>;

    /// Returns whether a record was removed
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Removes records missing a name or a kingdom and returns them
    async fn delete_incomplete(&self) -> AppResult<Vec<Sample>>;

    async fn health_check(&self) -> AppResult<bool>;
}
