use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::application::ports::upload_store::{StoredUpload, UploadStore};

pub struct FsUploadStore {
    root: PathBuf,
}

impl FsUploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Keeps only characters that are safe in a path segment.
pub fn sanitize_segment(name: &str) -> String {
    let s: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(64)
        .collect();
    if s.is_empty() { "misc".into() } else { s }
}

fn stored_extension(original: Option<&str>) -> Option<String> {
    let name = original?;
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > 10 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Normalises a client-supplied relative path, rejecting anything that could escape the root.
pub fn normalize_relative(rest_path: &str) -> anyhow::Result<PathBuf> {
    let mut relative = PathBuf::new();
    for component in Path::new(rest_path).components() {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => continue,
            _ => anyhow::bail!("forbidden"),
        }
    }
    if relative.as_os_str().is_empty() {
        anyhow::bail!("forbidden");
    }
    Ok(relative)
}

#[async_trait]
impl UploadStore for FsUploadStore {
    async fn save(
        &self,
        category: &str,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload> {
        let category = sanitize_segment(category);
        let dir = self.root.join(&category);
        tokio::fs::create_dir_all(&dir).await?;
        let filename = match stored_extension(original_filename) {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        };
        tokio::fs::write(dir.join(&filename), bytes).await?;
        tracing::debug!(category = %category, filename = %filename, size = bytes.len(), "upload_stored");
        Ok(StoredUpload {
            relative_path: format!("{category}/{filename}"),
            size: bytes.len() as i64,
        })
    }

    async fn resolve(&self, relative_path: &str) -> anyhow::Result<PathBuf> {
        let relative = normalize_relative(relative_path)?;
        let full_path = self.root.join(relative);
        if !full_path.starts_with(&self.root) {
            anyhow::bail!("forbidden");
        }
        if !tokio::fs::try_exists(&full_path).await.unwrap_or(false) {
            anyhow::bail!("not_found");
        }
        Ok(full_path)
    }

    async fn read_bytes(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(relative_path).await?;
        Ok(tokio::fs::read(path).await?)
    }

    async fn delete(&self, relative_path: &str) -> anyhow::Result<()> {
        let path = self.resolve(relative_path).await?;
        tokio::fs::remove_file(&path).await?;
        tracing::debug!(path = %relative_path, "upload_deleted");
        Ok(())
    }
}
