use super::DraftStore;
use crate::error::AppResult;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-local draft store, used in tests and in-memory mode
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    drafts: RwLock<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DraftStore for MemoryDraftStore {
    async fn load(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.drafts.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: &str) -> AppResult<()> {
        self.drafts
            .write()
            .await
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.drafts.write().await.remove(key);
        Ok(())
    }
}
