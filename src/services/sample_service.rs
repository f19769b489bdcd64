use crate::{
    dashboard::{self, DashboardStats},
    error::{AppError, AppResult},
    export,
    file_processing::FileProcessor,
    filter::{SampleFilter, filter_samples},
    identifier,
    models::{MediaKind, NewSample, ProjectType, Sample, SampleSearch, SampleUpdate},
    repositories::SampleStore,
    storage::{self, Storage},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NextSampleId {
    pub sample_id: String,
    pub sample_number: i32,
}

/// A file received for attachment to a sample
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub kind: MediaKind,
    pub filename: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    /// Public path of the stored file
    pub path: String,
    /// File name the client sent
    pub original_name: String,
    pub kind: MediaKind,
    pub size: u64,
    pub mime_type: String,
    pub md5: String,
    pub sha256: String,
    pub sample: Sample,
}

/// Sample use cases shared by the REST handlers and draft submission
#[derive(Clone)]
pub struct SampleService {
    store: Arc<dyn SampleStore>,
    storage: Arc<dyn Storage>,
    file_processor: FileProcessor,
}

impl SampleService {
    pub fn new(
        store: Arc<dyn SampleStore>,
        storage: Arc<dyn Storage>,
        file_processor: FileProcessor,
    ) -> Self {
        Self {
            store,
            storage,
            file_processor,
        }
    }

    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }

    pub async fn register(&self, new: NewSample) -> AppResult<Sample> {
        let sample_number = match new.sample_number {
            Some(number) => number,
            None => {
                let existing = self
                    .store
                    .list_by_project(new.project_type, new.project_number)
                    .await?;
                identifier::next_sample_number(new.project_type, new.project_number, &existing)
            }
        };

        let mut sample = new.into_sample(sample_number);
        sample.prepare_for_save()?;
        let sample = self.store.insert(&sample).await?;

        tracing::info!("registered sample {}", sample.sample_id);
        Ok(sample)
    }

    pub async fn next_sample_id(
        &self,
        project_type: ProjectType,
        project_number: i32,
    ) -> AppResult<NextSampleId> {
        identifier::validate_number("projectNumber", project_number)?;
        let existing = self
            .store
            .list_by_project(project_type, project_number)
            .await?;
        let sample_number = identifier::next_sample_number(project_type, project_number, &existing);

        Ok(NextSampleId {
            sample_id: identifier::format_sample_id(project_type, project_number, sample_number),
            sample_number,
        })
    }

    pub async fn get(&self, sample_id: &str) -> AppResult<Sample> {
        if identifier::parse_sample_id(sample_id).is_none() {
            return Err(AppError::not_found(format!("sample {} not found", sample_id)));
        }
        self.store
            .find_by_sample_id(sample_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("sample {} not found", sample_id)))
    }

    pub async fn list(&self, filter: &SampleFilter) -> AppResult<Vec<Sample>> {
        let samples = self.store.list().await?;
        if !filter.is_active() {
            return Ok(samples);
        }
        Ok(filter_samples(&samples, filter).into_iter().cloned().collect())
    }

    pub async fn search(&self, search: &SampleSearch) -> AppResult<Vec<Sample>> {
        self.store.search(search).await
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let samples = self.store.list().await?;
        Ok(dashboard::aggregate(&samples))
    }

    pub async fn export_csv(&self) -> AppResult<Vec<u8>> {
        let samples = self.store.list().await?;
        let csv = export::samples_to_csv(&samples)?;
        tracing::info!("exported {} samples to CSV", samples.len());
        Ok(csv)
    }

    /// Applies a partial update; the identifier follows the new numbers
    pub async fn update(&self, sample_id: &str, update: SampleUpdate) -> AppResult<Sample> {
        let mut sample = self.get(sample_id).await?;
        update.apply(&mut sample);
        sample.prepare_for_save()?;
        let saved = self.store.replace(sample.id, &sample).await?;

        if saved.sample_id != sample_id {
            tracing::info!("sample {} renamed to {}", sample_id, saved.sample_id);
        } else {
            tracing::info!("updated sample {}", sample_id);
        }
        Ok(saved)
    }

    pub async fn remove(&self, sample_id: &str) -> AppResult<Sample> {
        let sample = self.get(sample_id).await?;
        if !self.store.delete(sample.id).await? {
            return Err(AppError::not_found(format!("sample {} not found", sample_id)));
        }
        self.remove_files(&sample).await;

        tracing::info!("deleted sample {}", sample_id);
        Ok(sample)
    }

    /// Stores the image and links it to the sample. The sample is looked up
    /// before the file is inspected, so an unknown identifier wins over a
    /// bad file.
    pub async fn attach_image(&self, sample_id: &str, upload: ImageUpload) -> AppResult<UploadedImage> {
        let mut sample = self.get(sample_id).await?;

        let info = self
            .file_processor
            .process_image(&upload.data, &upload.filename)
            .await?;
        let key = storage::unique_file_name(&info.extension);
        let path = self
            .storage
            .upload(&key, &upload.data, Some(&info.mime_type))
            .await?;

        let replaced = sample.attach_image(upload.kind, path.clone());
        sample.updated_at = chrono::Utc::now();
        sample.prepare_for_save()?;
        let sample = self.store.replace(sample.id, &sample).await?;

        if let Some(old) = replaced {
            self.remove_file(&old).await;
        }

        tracing::info!("attached {} to sample {}", path, sample.sample_id);
        Ok(UploadedImage {
            path,
            original_name: info.filename,
            kind: upload.kind,
            size: info.size,
            mime_type: info.mime_type,
            md5: info.hashes.md5,
            sha256: info.hashes.sha256,
            sample,
        })
    }

    /// Deletes records without a name or kingdom
    pub async fn cleanup(&self) -> AppResult<Vec<Sample>> {
        let removed = self.store.delete_incomplete().await?;
        for sample in &removed {
            self.remove_files(sample).await;
        }
        tracing::info!("cleanup removed {} incomplete samples", removed.len());
        Ok(removed)
    }

    async fn remove_files(&self, sample: &Sample) {
        for path in sample.image_paths() {
            self.remove_file(path).await;
        }
    }

    async fn remove_file(&self, path: &str) {
        let Some(key) = self.storage.key_from_public_path(path) else {
            tracing::debug!("skipping file outside upload storage: {}", path);
            return;
        };
        if let Err(e) = self.storage.delete(&key).await {
            tracing::warn!("failed to delete {}: {}", path, e);
        }
    }
}
