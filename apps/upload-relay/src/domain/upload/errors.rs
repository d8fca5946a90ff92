use thiserror::Error;

/// Failures of the upload-and-tag workflow.
///
/// The payload carries the underlying cause for logs; callers only ever see
/// [`UploadError::user_message`].
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to create uploads directory: {0}")]
    StorageSetup(String),
    #[error("Failed to get uploaded file: {0}")]
    MissingFile(String),
    #[error("Unsafe file name: {0}")]
    UnsafeFileName(String),
    #[error("Failed to save uploaded file: {0}")]
    LocalSave(String),
    #[error("Failed to initialize Cloudinary: {0}")]
    ClientInit(String),
    #[error("Failed to upload to Cloudinary: {0}")]
    ProviderUpload(String),
    #[error("No tags returned from Cloudinary for {0}")]
    NoTags(String),
}

impl UploadError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::StorageSetup(_) => "Failed to create uploads directory",
            Self::MissingFile(_) => "Failed to get uploaded file",
            Self::UnsafeFileName(_) => "Unsafe file name",
            Self::LocalSave(_) => "Failed to save uploaded file",
            Self::ClientInit(_) => "Failed to initialize Cloudinary",
            Self::ProviderUpload(_) => "Failed to upload to Cloudinary",
            Self::NoTags(_) => "No tags returned from Cloudinary",
        }
    }
}
