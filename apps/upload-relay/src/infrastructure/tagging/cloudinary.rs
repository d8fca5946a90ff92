use super::{
    signature::{SignatureAlgorithm, sign},
    traits::{TaggingService, TaggingServiceBuilder},
};
use crate::domain::upload::entity::{ProviderCredentials, TaggingRequest, UploadResult};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{
    Url,
    multipart::{Form, Part},
};
use serde::Deserialize;
use std::{collections::BTreeMap, sync::Arc, time::Duration};

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

/// Creates a [`CloudinaryClient`] per set of credentials, sharing one
/// connection pool.
pub struct CloudinaryServiceBuilder {
    http: reqwest::Client,
    api_base_url: String,
    algorithm: SignatureAlgorithm,
    timeout: Option<Duration>,
}

impl CloudinaryServiceBuilder {
    pub fn new(
        api_base_url: String,
        algorithm: SignatureAlgorithm,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("upload-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            api_base_url,
            algorithm,
            timeout,
        })
    }
}

impl TaggingServiceBuilder for CloudinaryServiceBuilder {
    fn build(&self, credentials: &ProviderCredentials) -> anyhow::Result<Arc<dyn TaggingService>> {
        let client = CloudinaryClient::new(
            self.http.clone(),
            credentials.clone(),
            &self.api_base_url,
            self.algorithm,
            self.timeout,
        )?;
        Ok(Arc::new(client))
    }
}

/// Signed client for the Cloudinary upload endpoint of one cloud.
pub struct CloudinaryClient {
    http: reqwest::Client,
    upload_url: Url,
    credentials: ProviderCredentials,
    algorithm: SignatureAlgorithm,
    timeout: Option<Duration>,
}

impl CloudinaryClient {
    /// # Errors
    ///
    /// Fails when the cloud name cannot be used as a single URL path segment
    /// or the base URL does not parse. Empty credentials are accepted.
    pub fn new(
        http: reqwest::Client,
        credentials: ProviderCredentials,
        api_base_url: &str,
        algorithm: SignatureAlgorithm,
        timeout: Option<Duration>,
    ) -> anyhow::Result<Self> {
        if credentials
            .cloud_name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control())
        {
            anyhow::bail!("cloud name {:?} is not a valid path segment", credentials.cloud_name);
        }

        let upload_url = Url::parse(&format!(
            "{}/{}/auto/upload",
            api_base_url.trim_end_matches('/'),
            credentials.cloud_name
        ))
        .with_context(|| format!("invalid upload API base URL {:?}", api_base_url))?;

        Ok(Self {
            http,
            upload_url,
            credentials,
            algorithm,
            timeout,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    fn signed_params(&self, request: &TaggingRequest) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("timestamp", request.timestamp.to_string()),
            ("categorization", request.categorization.clone()),
            ("auto_tagging", request.confidence_threshold.to_string()),
        ])
    }
}

#[async_trait]
impl TaggingService for CloudinaryClient {
    async fn upload_and_tag(&self, request: &TaggingRequest) -> anyhow::Result<UploadResult> {
        let data = tokio::fs::read(&request.local_path)
            .await
            .with_context(|| format!("reading {}", request.local_path.display()))?;
        let file_name = request
            .local_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let params = self.signed_params(request);
        let signature = sign(&params, &self.credentials.api_secret, self.algorithm);

        let mut form = Form::new()
            .part("file", Part::bytes(data).file_name(file_name))
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key, value);
        }
        if self.algorithm != SignatureAlgorithm::Sha1 {
            form = form.text("signature_algorithm", self.algorithm.as_str());
        }

        let mut builder = self.http.post(self.upload_url.clone()).multipart(form);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let res = builder
            .send()
            .await
            .with_context(|| format!("sending upload to {}", self.upload_url))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            anyhow::bail!("provider responded {}: {}", status, message);
        }

        let result: UploadResult = res.json().await.context("decoding upload response")?;
        tracing::debug!(
            public_id = ?result.public_id,
            tags = result.tags.len(),
            "provider accepted upload"
        );
        Ok(result)
    }
}
