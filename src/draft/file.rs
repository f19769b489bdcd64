use super::{DraftStore, validate_key};
use crate::error::AppResult;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Drafts stored as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// Creates the directory if needed
    pub async fn new(dir: impl AsRef<Path>) -> AppResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::info!("draft directory: {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait::async_trait]
impl DraftStore for FileDraftStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match String::from_utf8(bytes) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) => {
                tracing::warn!("discarding draft {} with invalid UTF-8: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, key: &str, blob: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        // atomic replace
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, blob).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
