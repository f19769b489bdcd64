pub mod local;

pub use local::LocalStorage;

use crate::error::AppResult;
use std::path::Path;

/// Storage abstraction for uploaded files
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// Stores the file and returns its public path
    async fn upload(&self, key: &str, data: &[u8], content_type: Option<&str>) -> AppResult<String>;

    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Path the file is served under, e.g. `/uploads/<key>`
    fn public_path(&self, key: &str) -> String;

    /// Inverse of [`Storage::public_path`]. `None` for paths this storage
    /// does not serve.
    fn key_from_public_path(&self, path: &str) -> Option<String>;
}

/// `{unix_millis}-{random}{ext}`. Only the extension of the original name is
/// kept.
pub fn unique_file_name(extension: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::random_range(100_000_000..1_000_000_000);
    let extension = extension
        .trim_start_matches('.')
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if extension.is_empty() {
        format!("{}-{}", millis, suffix)
    } else {
        format!("{}-{}.{}", millis, suffix, extension)
    }
}

/// Extension of a client file name, with leading dot, or empty
pub fn original_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext))
        .unwrap_or_default()
}
