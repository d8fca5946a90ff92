use crate::domain::upload::entity::{ProviderCredentials, TaggingRequest, UploadResult};
use async_trait::async_trait;
use std::sync::Arc;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaggingService: Send + Sync {
    /// Upload the file at `request.local_path` and ask the provider to tag it.
    async fn upload_and_tag(&self, request: &TaggingRequest) -> anyhow::Result<UploadResult>;
}

/// Builds a provider client from account credentials.
#[cfg_attr(test, mockall::automock)]
pub trait TaggingServiceBuilder: Send + Sync {
    fn build(&self, credentials: &ProviderCredentials) -> anyhow::Result<Arc<dyn TaggingService>>;
}
