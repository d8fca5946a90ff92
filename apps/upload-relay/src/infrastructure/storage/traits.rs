use async_trait::async_trait;
use bytes::Bytes;
use std::path::PathBuf;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocalFileStore: Send + Sync {
    /// Create the storage root if missing. Succeeds when it already exists.
    async fn ensure_root(&self) -> anyhow::Result<()>;
    /// Write `data` under `file_name`, replacing any previous file of that name.
    async fn save(&self, file_name: &str, data: Bytes) -> anyhow::Result<PathBuf>;
}
