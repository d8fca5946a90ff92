use crate::{
    application::upload_and_tag::dto::UploadAndTagRequest,
    config::Config,
    domain::upload::{
        entity::{ProviderCredentials, StoredFile, TaggingRequest, UploadResult},
        errors::UploadError,
        value_objects::ConfidenceThreshold,
    },
    infrastructure::{storage::traits::LocalFileStore, tagging::traits::TaggingServiceBuilder},
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Stores an upload locally and relays it to the tagging provider.
///
/// Every step exits early with the first failure. Nothing is rolled back:
/// the local copy survives a failed provider call, and the remote asset
/// survives an empty tag list.
pub struct UploadAndTagUseCase {
    store: Arc<dyn LocalFileStore>,
    tagging: Arc<dyn TaggingServiceBuilder>,
    credentials: ProviderCredentials,
    categorization: String,
    confidence_threshold: ConfidenceThreshold,
    reject_unsafe_filenames: bool,
}

impl UploadAndTagUseCase {
    pub fn new(
        store: Arc<dyn LocalFileStore>,
        tagging: Arc<dyn TaggingServiceBuilder>,
        credentials: ProviderCredentials,
        categorization: String,
        confidence_threshold: ConfidenceThreshold,
        reject_unsafe_filenames: bool,
    ) -> Self {
        Self {
            store,
            tagging,
            credentials,
            categorization,
            confidence_threshold,
            reject_unsafe_filenames,
        }
    }

    pub fn from_config(
        config: &Config,
        store: Arc<dyn LocalFileStore>,
        tagging: Arc<dyn TaggingServiceBuilder>,
    ) -> Self {
        Self::new(
            store,
            tagging,
            config.credentials(),
            config.tagging_model.clone(),
            config.tagging_confidence_threshold,
            config.reject_unsafe_filenames,
        )
    }

    /// Makes sure the uploads directory exists before a file is accepted.
    #[instrument(skip(self))]
    pub async fn prepare_storage(&self) -> Result<(), UploadError> {
        self.store.ensure_root().await.map_err(|e| {
            error!("Failed to create uploads directory: {:#}", e);
            UploadError::StorageSetup(format!("{:#}", e))
        })
    }

    /// Saves the file, uploads it with auto-tagging enabled and checks that
    /// the provider returned at least one tag.
    ///
    /// # Errors
    ///
    /// - [`UploadError::UnsafeFileName`] when unsafe names are rejected
    /// - [`UploadError::LocalSave`] when the local write fails
    /// - [`UploadError::ClientInit`] when the provider client cannot be built
    /// - [`UploadError::ProviderUpload`] for any transport or provider error
    /// - [`UploadError::NoTags`] when the upload succeeded without tags
    #[instrument(skip(self, request), fields(
        file_name = %request.file_name,
        size = request.data.len()
    ))]
    pub async fn execute(&self, request: UploadAndTagRequest) -> Result<UploadResult, UploadError> {
        if self.reject_unsafe_filenames && !request.file_name.is_single_component() {
            warn!("Rejected unsafe file name {:?}", request.file_name.as_str());
            return Err(UploadError::UnsafeFileName(request.file_name.to_string()));
        }

        let size = request.data.len();
        let path = self
            .store
            .save(request.file_name.as_str(), request.data)
            .await
            .map_err(|e| {
                error!("Failed to save uploaded file: {:#}", e);
                UploadError::LocalSave(format!("{:#}", e))
            })?;
        let stored = StoredFile {
            file_name: request.file_name.to_string(),
            path,
            size,
        };
        info!(
            file_name = %stored.file_name,
            size = stored.size,
            path = %stored.path.display(),
            "File uploaded and saved successfully"
        );

        let client = self.tagging.build(&self.credentials).map_err(|e| {
            error!("Failed to initialize Cloudinary: {:#}", e);
            UploadError::ClientInit(format!("{:#}", e))
        })?;

        let tagging_request = TaggingRequest {
            local_path: stored.path.clone(),
            timestamp: chrono::Utc::now().timestamp(),
            categorization: self.categorization.clone(),
            confidence_threshold: self.confidence_threshold.value,
        };
        debug!(?tagging_request, "Submitting upload to provider");

        let result = client.upload_and_tag(&tagging_request).await.map_err(|e| {
            error!("Failed to upload to Cloudinary: {:#}", e);
            UploadError::ProviderUpload(format!("{:#}", e))
        })?;
        info!(secure_url = %result.secure_url, "File uploaded to Cloudinary successfully");

        if !result.has_tags() {
            warn!(secure_url = %result.secure_url, "No tags returned from Cloudinary");
            return Err(UploadError::NoTags(result.secure_url));
        }

        info!(tags = ?result.tags, "Tags returned from Cloudinary");
        Ok(result)
    }
}
