pub mod hasher;
pub mod validator;

pub use hasher::FileHasher;
pub use validator::FileValidator;

use crate::error::AppResult;
use crate::storage;
use serde::{Deserialize, Serialize};

/// Inspection result for an uploaded image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub filename: String,
    pub size: u64,
    pub mime_type: String,
    /// Extension the stored copy gets, with leading dot
    pub extension: String,
    pub hashes: FileHashes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHashes {
    pub md5: String,
    pub sha256: String,
}

#[derive(Debug, Clone)]
pub struct FileProcessingConfig {
    pub max_file_size: u64,
}

impl Default for FileProcessingConfig {
    fn default() -> Self {
        Self {
            max_file_size: 20 * 1024 * 1024, // 20MB
        }
    }
}

/// Validates and fingerprints uploads
#[derive(Debug, Clone)]
pub struct FileProcessor {
    hasher: FileHasher,
    validator: FileValidator,
}

impl FileProcessor {
    pub fn new(config: FileProcessingConfig) -> Self {
        Self {
            hasher: FileHasher::new(),
            validator: FileValidator::new(&config),
        }
    }

    /// Accepts only content that sniffs as an image, whatever the client
    /// claims the type is
    pub async fn process_image(&self, file_data: &[u8], filename: &str) -> AppResult<ImageInfo> {
        self.validator.validate_file(file_data, filename)?;
        let kind = self.validator.validate_image(file_data)?;
        let hashes = self.hasher.calculate_hashes(file_data).await?;

        let extension = match infer_extension(kind.extension()) {
            Some(ext) => ext,
            None => storage::original_extension(filename).to_lowercase(),
        };

        tracing::debug!(
            "image {} accepted: {} ({} bytes, md5 {})",
            filename,
            kind.mime_type(),
            file_data.len(),
            hashes.md5
        );

        Ok(ImageInfo {
            filename: filename.to_string(),
            size: file_data.len() as u64,
            mime_type: kind.mime_type().to_string(),
            extension,
            hashes,
        })
    }
}

fn infer_extension(ext: &str) -> Option<String> {
    if ext.is_empty() {
        None
    } else {
        Some(format!(".{}", ext))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Smallest byte run that sniffs as PNG
    pub const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];
}

#[cfg(test)]
mod tests {
    use super::fixtures::PNG_BYTES;
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_png_is_accepted() {
        let processor = FileProcessor::new(FileProcessingConfig::default());
        let info = processor.process_image(PNG_BYTES, "Reef Photo.PNG").await.unwrap();
        assert_eq!(info.mime_type, "image/png");
        assert_eq!(info.extension, ".png");
        assert_eq!(info.size, PNG_BYTES.len() as u64);
        assert_eq!(info.hashes.sha256.len(), 64);
    }

    #[tokio::test]
    async fn test_text_is_rejected() {
        let processor = FileProcessor::new(FileProcessingConfig::default());
        let err = processor
            .process_image(b"genus,species\nVibrio,harveyi\n", "notes.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedFileType { .. }));
    }

    #[tokio::test]
    async fn test_size_limit() {
        let processor = FileProcessor::new(FileProcessingConfig { max_file_size: 8 });
        let err = processor
            .process_image(PNG_BYTES, "reef.png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::FileTooLarge { max_size: 8 }));
    }
}
