//! Application configuration loading from environment variables.
//!
//! Everything is read once at startup and handed to handlers through the
//! router state; nothing re-reads the environment per request.
//!
//! # Environment Variables
//!
//! ## Provider credentials
//! - `CLOUDINARY_CLOUD_NAME`: Cloudinary account (cloud) name
//! - `CLOUDINARY_API_KEY`: Cloudinary API key
//! - `CLOUDINARY_API_SECRET`: Cloudinary API secret
//!
//! The credentials have no defaults and are not checked at startup. A missing
//! value is treated as empty and surfaces as a failed upload call.
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,upload_relay=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 8080)
//! - `UPLOADS_DIR`: Local directory for stored uploads (default: "uploads")
//! - `MAX_UPLOAD_BYTES`: Request body limit (default: 20 MiB)
//! - `CLOUDINARY_API_BASE_URL`: Upload API root (default: "https://api.cloudinary.com/v1_1")
//! - `CLOUDINARY_SIGNATURE_ALGORITHM`: "sha1" or "sha256" (default: "sha1")
//! - `TAGGING_MODEL`: Categorization add-on to request (default: "google_tagging")
//! - `TAGGING_CONFIDENCE_THRESHOLD`: Auto-tagging threshold in 0.0..=1.0 (default: 0.5)
//! - `PROVIDER_TIMEOUT_SECONDS`: Outbound request timeout (default: none)
//! - `REJECT_UNSAFE_FILENAMES`: Refuse names that escape the uploads directory (default: false)

use crate::{
    domain::upload::{entity::ProviderCredentials, value_objects::ConfidenceThreshold},
    infrastructure::tagging::signature::SignatureAlgorithm,
};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudinary.com/v1_1";
pub const DEFAULT_TAGGING_MODEL: &str = "google_tagging";

/// Complete server configuration loaded from environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Directory uploads are written to and served from
    pub uploads_dir: PathBuf,

    /// Maximum accepted request body in bytes
    pub max_upload_bytes: usize,

    /// Cloudinary cloud name
    pub cloudinary_cloud_name: String,

    /// Cloudinary API key
    pub cloudinary_api_key: String,

    /// Cloudinary API secret
    pub cloudinary_api_secret: String,

    /// Root of the upload API, without the cloud name segment
    pub cloudinary_api_base_url: String,

    /// Digest used to sign upload parameters
    pub cloudinary_signature_algorithm: SignatureAlgorithm,

    /// Categorization add-on asked to tag the asset
    pub tagging_model: String,

    /// Minimum confidence for a tag to be applied
    pub tagging_confidence_threshold: ConfidenceThreshold,

    /// Timeout for the provider call; `None` waits indefinitely
    pub provider_timeout_seconds: Option<u64>,

    /// Reject client file names containing separators or dot segments
    pub reject_unsafe_filenames: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed, or if the
    /// confidence threshold falls outside `0.0..=1.0`.
    pub fn from_env() -> anyhow::Result<Self> {
        let threshold: f64 = env_or("TAGGING_CONFIDENCE_THRESHOLD", 0.5)?;
        let tagging_confidence_threshold = ConfidenceThreshold::new(threshold).map_err(|e| {
            anyhow::anyhow!("Invalid TAGGING_CONFIDENCE_THRESHOLD {}: {}", threshold, e)
        })?;

        Ok(Self {
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 8080)?,
            uploads_dir: env_or("UPLOADS_DIR", PathBuf::from("uploads"))?,
            max_upload_bytes: env_or("MAX_UPLOAD_BYTES", 20 * 1024 * 1024)?,
            cloudinary_cloud_name: env_or("CLOUDINARY_CLOUD_NAME", String::new())?,
            cloudinary_api_key: env_or("CLOUDINARY_API_KEY", String::new())?,
            cloudinary_api_secret: env_or("CLOUDINARY_API_SECRET", String::new())?,
            cloudinary_api_base_url: env_or(
                "CLOUDINARY_API_BASE_URL",
                DEFAULT_API_BASE_URL.to_string(),
            )?,
            cloudinary_signature_algorithm: env_or(
                "CLOUDINARY_SIGNATURE_ALGORITHM",
                SignatureAlgorithm::Sha1,
            )?,
            tagging_model: env_or("TAGGING_MODEL", DEFAULT_TAGGING_MODEL.to_string())?,
            tagging_confidence_threshold,
            provider_timeout_seconds: env_opt("PROVIDER_TIMEOUT_SECONDS")?,
            reject_unsafe_filenames: env_or("REJECT_UNSAFE_FILENAMES", false)?,
        })
    }

    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            cloud_name: self.cloudinary_cloud_name.clone(),
            api_key: self.cloudinary_api_key.clone(),
            api_secret: self.cloudinary_api_secret.clone(),
        }
    }
}

/// Load an environment variable with a default value.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(env_opt(key)?.unwrap_or(default))
}

/// Load an optional environment variable. Empty values count as unset.
fn env_opt<T>(key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) if !val.trim().is_empty() => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        _ => Ok(None),
    }
}
