use super::FileHashes;
use crate::error::{AppError, AppResult};
use sha2::{Digest, Sha256};
use tokio::task;

/// MD5 and SHA-256 digests of uploaded files
#[derive(Debug, Clone, Default)]
pub struct FileHasher;

impl FileHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashing runs on the blocking pool so large images do not stall the runtime
    pub async fn calculate_hashes(&self, data: &[u8]) -> AppResult<FileHashes> {
        let data = data.to_vec();

        task::spawn_blocking(move || FileHashes {
            md5: Self::calculate_md5(&data),
            sha256: Self::calculate_sha256(&data),
        })
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
    }

    pub fn calculate_md5(data: &[u8]) -> String {
        format!("{:x}", md5::compute(data))
    }

    pub fn calculate_sha256(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_calculation() {
        let hashes = FileHasher::new()
            .calculate_hashes(b"Hello, World!")
            .await
            .unwrap();

        assert_eq!(hashes.md5, "65a8e27d8879283831b664bd8b7f0ad4");
        assert_eq!(
            hashes.sha256,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }
}
