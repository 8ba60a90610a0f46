use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StoredUpload {
    /// Path relative to the upload root, always with `/` separators.
    pub relative_path: String,
    pub size: i64,
}

#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn save(
        &self,
        category: &str,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload>;
    /// Resolves a relative path under the upload root, rejecting traversal.
    async fn resolve(&self, relative_path: &str) -> anyhow::Result<PathBuf>;
    async fn read_bytes(&self, relative_path: &str) -> anyhow::Result<Vec<u8>>;
    async fn delete(&self, relative_path: &str) -> anyhow::Result<()>;
}

/// Removes uploads whose owning record was never written. Failures are only logged.
pub async fn discard_uploads<S: UploadStore + ?Sized>(store: &S, paths: &[String]) {
    for path in paths {
        if let Err(err) = store.delete(path).await {
            tracing::warn!(error = ?err, path = %path, "discard_upload_failed");
        }
    }
}
