use super::Storage;
use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
};
use std::io::ErrorKind;
use std::path::PathBuf;

/// Files kept in a flat directory on disk and served by the HTTP layer
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    /// Creates the upload directory if needed
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.upload_dir);
        tokio::fs::create_dir_all(&root).await?;
        tracing::info!("upload directory: {}", root.display());

        Ok(Self {
            root,
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        if key.is_empty() || key.contains('/') || key.contains('\\') || key.contains("..") {
            return Err(AppError::storage(format!("invalid storage key {:?}", key)));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait::async_trait]
impl Storage for LocalStorage {
    async fn upload(&self, key: &str, data: &[u8], content_type: Option<&str>) -> AppResult<String> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::storage(format!("failed to write {}: {}", key, e)))?;

        tracing::info!(
            "stored {} ({} bytes, {})",
            key,
            data.len(),
            content_type.unwrap_or("application/octet-stream")
        );
        Ok(self.public_path(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!("deleted file {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("failed to delete {}: {}", key, e))),
        }
    }

    fn public_path(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }

    fn key_from_public_path(&self, path: &str) -> Option<String> {
        let key = path.strip_prefix(&self.public_prefix)?.strip_prefix('/')?;
        if key.is_empty() || key.contains('/') {
            return None;
        }
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn storage(temp_dir: &TempDir) -> LocalStorage {
        LocalStorage::new(&StorageConfig {
            upload_dir: temp_dir.path().join("uploads").to_string_lossy().into_owned(),
            public_prefix: "/uploads/".to_string(),
            max_size: 1024,
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_upload_and_delete() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir).await;
        let on_disk = temp_dir.path().join("uploads/1700000000000-123456789.png");

        let public = storage
            .upload("1700000000000-123456789.png", b"img", Some("image/png"))
            .await
            .unwrap();
        assert_eq!(public, "/uploads/1700000000000-123456789.png");
        assert_eq!(std::fs::read(&on_disk).unwrap(), b"img");

        storage.delete("1700000000000-123456789.png").await.unwrap();
        assert!(!on_disk.exists());
        // deleting a missing file is not an error
        storage.delete("1700000000000-123456789.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_keys_cannot_escape_root() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir).await;
        assert!(storage.upload("../x.png", b"img", None).await.is_err());
        assert!(storage.upload("a/b.png", b"img", None).await.is_err());
    }

    #[tokio::test]
    async fn test_public_path_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = storage(&temp_dir).await;
        assert_eq!(
            storage.key_from_public_path("/uploads/1-2.png").as_deref(),
            Some("1-2.png")
        );
        assert_eq!(storage.key_from_public_path("/static/1-2.png"), None);
        assert_eq!(storage.key_from_public_path("/uploads/"), None);
        assert_eq!(storage.key_from_public_path("https://x/1.png"), None);
    }
}
