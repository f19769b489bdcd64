pub mod file;
pub mod memory;

pub use file::FileDraftStore;
pub use memory::MemoryDraftStore;

use crate::error::{AppError, AppResult};
use crate::models::{Draft, DraftSection};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Persistence for serialized wizard drafts, keyed by a client-chosen name
#[async_trait::async_trait]
pub trait DraftStore: Send + Sync {
    async fn load(&self, key: &str) -> AppResult<Option<String>>;

    async fn save(&self, key: &str, blob: &str) -> AppResult<()>;

    /// Removing a missing draft is not an error
    async fn remove(&self, key: &str) -> AppResult<()>;
}

const MAX_KEY_LEN: usize = 64;

/// Keys become file names, so only `[A-Za-z0-9_-]{1,64}` is accepted
pub fn validate_key(key: &str) -> AppResult<()> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !valid {
        return Err(AppError::bad_request(format!(
            "invalid draft key {:?}: use 1-{} letters, digits, '_' or '-'",
            key, MAX_KEY_LEN
        )));
    }
    Ok(())
}

/// Read-modify-write access to drafts on top of a [`DraftStore`]
#[derive(Clone)]
pub struct DraftService {
    store: Arc<dyn DraftStore>,
}

impl DraftService {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    /// Stored draft, or the default skeleton when nothing (or nothing
    /// readable) is stored
    pub async fn read(&self, key: &str) -> AppResult<Draft> {
        validate_key(key)?;
        Ok(match self.store.load(key).await? {
            Some(raw) => Draft::parse_or_default(&raw),
            None => Draft::default(),
        })
    }

    pub async fn update_section(
        &self,
        key: &str,
        section: DraftSection,
        partial: Map<String, Value>,
    ) -> AppResult<Draft> {
        let mut draft = self.read(key).await?;
        draft.merge_section(section, partial);
        let blob = serde_json::to_string(&draft)?;
        self.store.save(key, &blob).await?;
        tracing::debug!("draft {} section {} saved", key, section);
        Ok(draft)
    }

    pub async fn clear(&self, key: &str) -> AppResult<()> {
        validate_key(key)?;
        self.store.remove(key).await?;
        tracing::debug!("draft {} cleared", key);
        Ok(())
    }
}
