use super::traits::LocalFileStore;
use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

/// Stores uploads as flat files under a single directory.
pub struct LocalDiskStore {
    root: PathBuf,
}

impl LocalDiskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl LocalFileStore for LocalDiskStore {
    async fn ensure_root(&self) -> anyhow::Result<()> {
        // create_dir_all treats an existing directory as success, so two
        // first requests racing here both succeed.
        tokio::fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("creating {}", self.root.display()))
    }

    async fn save(&self, file_name: &str, data: Bytes) -> anyhow::Result<PathBuf> {
        let path = self.root.join(file_name);
        tokio::fs::write(&path, &data)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "upload stored locally");
        Ok(path)
    }
}
