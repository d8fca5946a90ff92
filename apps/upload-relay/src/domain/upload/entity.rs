use serde::Deserialize;
use std::path::PathBuf;

/// Credentials for the tagging provider account.
///
/// Values are passed through untouched; empty strings are allowed and only
/// fail once the provider rejects the signed request.
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// A client upload persisted under the uploads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub file_name: String,
    pub path: PathBuf,
    pub size: usize,
}

/// Parameters of a single upload-with-tagging call.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggingRequest {
    pub local_path: PathBuf,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub categorization: String,
    pub confidence_threshold: f64,
}

/// Provider response for a stored and tagged asset.
///
/// `tags` keeps the order the provider returned.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResult {
    pub secure_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub asset_id: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl UploadResult {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}
