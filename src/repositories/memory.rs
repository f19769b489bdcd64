use super::SampleStore;
use crate::{
    error::{AppError, AppResult},
    models::{ProjectType, Sample, SampleSearch},
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Sample store kept in process memory, in insertion order
#[derive(Debug, Default)]
pub struct MemorySampleStore {
    samples: RwLock<Vec<Sample>>,
}

impl MemorySampleStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(sample_id: &str) -> AppError {
    AppError::conflict(format!("sample {} already exists", sample_id))
}

#[async_trait::async_trait]
impl SampleStore for MemorySampleStore {
    async fn insert(&self, sample: &Sample) -> AppResult<Sample> {
        let mut samples = self.samples.write().await;
        if samples
            .iter()
            .any(|s| s.sample_id == sample.sample_id || s.id == sample.id)
        {
            return Err(duplicate(&sample.sample_id));
        }
        samples.push(sample.clone());
        Ok(sample.clone())
    }

    async fn find_by_sample_id(&self, sample_id: &str) -> AppResult<Option<Sample>> {
        let samples = self.samples.read().await;
        Ok(samples.iter().find(|s| s.sample_id == sample_id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Sample>> {
        Ok(self.samples.read().await.clone())
    }

    async fn list_by_project(
        &self,
        project_type: ProjectType,
        project_number: i32,
    ) -> AppResult<Vec<Sample>> {
        let samples = self.samples.read().await;
        let mut matching: Vec<Sample> = samples
            .iter()
            .filter(|s| s.project_type == project_type && s.project_number == project_number)
            .cloned()
            .collect();
        matching.sort_by_key(|s| s.sample_number);
        Ok(matching)
    }

    async fn search(&self, search: &SampleSearch) -> AppResult<Vec<Sample>> {
        let samples = self.samples.read().await;
        Ok(samples
            .iter()
            .filter(|s| search.matches(s))
            .cloned()
            .collect())
    }

    async fn replace(&self, id: Uuid, sample: &Sample) -> AppResult<Sample> {
        let mut samples = self.samples.write().await;
        if samples
            .iter()
            .any(|s| s.id != id && s.sample_id == sample.sample_id)
        {
            return Err(duplicate(&sample.sample_id));
        }

        let slot = samples
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::not_found(format!("sample {} not found", sample.sample_id)))?;
        *slot = Sample {
            id,
            created_at: slot.created_at,
            ..sample.clone()
        };
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut samples = self.samples.write().await;
        let before = samples.len();
        samples.retain(|s| s.id != id);
        Ok(samples.len() < before)
    }

    async fn delete_incomplete(&self) -> AppResult<Vec<Sample>> {
        let mut samples = self.samples.write().await;
        let (removed, kept): (Vec<Sample>, Vec<Sample>) =
            samples.drain(..).partition(Sample::is_incomplete);
        *samples = kept;
        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
