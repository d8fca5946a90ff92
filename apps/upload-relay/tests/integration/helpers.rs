use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tempfile::TempDir;
use tower::ServiceExt;
use upload_relay::{
    application::upload_and_tag::use_case::UploadAndTagUseCase,
    config::{Config, DEFAULT_API_BASE_URL, DEFAULT_TAGGING_MODEL},
    domain::upload::{
        entity::{ProviderCredentials, TaggingRequest, UploadResult},
        value_objects::ConfidenceThreshold,
    },
    infrastructure::{
        storage::local_disk_store::LocalDiskStore,
        tagging::{
            signature::SignatureAlgorithm,
            traits::{TaggingService, TaggingServiceBuilder},
        },
    },
    presentation::http::{routes::create_router, state::AppState},
};
use uuid::Uuid;

/// What the fake provider does when asked to upload.
#[derive(Clone, Debug)]
pub enum ProviderBehavior {
    Respond { secure_url: String, tags: Vec<String> },
    Fail(String),
    RefuseClient(String),
}

impl ProviderBehavior {
    pub fn tags(secure_url: &str, tags: &[&str]) -> Self {
        Self::Respond {
            secure_url: secure_url.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// A provider call as the fake saw it, with the file content at call time.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    pub request: TaggingRequest,
    pub content: Vec<u8>,
}

type CallLog = Arc<Mutex<Vec<RecordedCall>>>;

struct FakeTaggingBuilder {
    behavior: ProviderBehavior,
    calls: CallLog,
}

impl TaggingServiceBuilder for FakeTaggingBuilder {
    fn build(&self, _credentials: &ProviderCredentials) -> anyhow::Result<Arc<dyn TaggingService>> {
        if let ProviderBehavior::RefuseClient(reason) = &self.behavior {
            anyhow::bail!("{}", reason);
        }
        Ok(Arc::new(FakeTaggingService {
            behavior: self.behavior.clone(),
            calls: self.calls.clone(),
        }))
    }
}

struct FakeTaggingService {
    behavior: ProviderBehavior,
    calls: CallLog,
}

#[async_trait]
impl TaggingService for FakeTaggingService {
    async fn upload_and_tag(&self, request: &TaggingRequest) -> anyhow::Result<UploadResult> {
        let content = tokio::fs::read(&request.local_path).await?;
        self.calls.lock().unwrap().push(RecordedCall {
            request: request.clone(),
            content,
        });

        match &self.behavior {
            ProviderBehavior::Respond { secure_url, tags } => Ok(UploadResult {
                secure_url: secure_url.clone(),
                tags: tags.clone(),
                ..Default::default()
            }),
            ProviderBehavior::Fail(reason) => Err(anyhow::anyhow!("{}", reason)),
            ProviderBehavior::RefuseClient(_) => unreachable!("client was never built"),
        }
    }
}

pub struct TestApp {
    pub app: Router,
    pub uploads_dir: PathBuf,
    pub calls: CallLog,
    pub tmp: TempDir,
}

impl TestApp {
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn build_config(uploads_dir: PathBuf, reject_unsafe_filenames: bool) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        uploads_dir,
        max_upload_bytes: 1024 * 1024,
        cloudinary_cloud_name: "test-cloud".to_string(),
        cloudinary_api_key: "test-key".to_string(),
        cloudinary_api_secret: "test-secret".to_string(),
        cloudinary_api_base_url: DEFAULT_API_BASE_URL.to_string(),
        cloudinary_signature_algorithm: SignatureAlgorithm::Sha1,
        tagging_model: DEFAULT_TAGGING_MODEL.to_string(),
        tagging_confidence_threshold: ConfidenceThreshold::default(),
        provider_timeout_seconds: None,
        reject_unsafe_filenames,
    }
}

pub fn spawn_app(behavior: ProviderBehavior) -> TestApp {
    spawn_app_with(behavior, false, None)
}

/// `uploads_dir` defaults to a not-yet-created `uploads` directory inside a
/// fresh temp dir.
pub fn spawn_app_with(
    behavior: ProviderBehavior,
    reject_unsafe_filenames: bool,
    uploads_dir: Option<PathBuf>,
) -> TestApp {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let uploads_dir = uploads_dir.unwrap_or_else(|| tmp.path().join("uploads"));
    let config = build_config(uploads_dir.clone(), reject_unsafe_filenames);

    let calls: CallLog = Arc::default();
    let tagging = Arc::new(FakeTaggingBuilder {
        behavior,
        calls: calls.clone(),
    });
    let store = Arc::new(LocalDiskStore::new(uploads_dir.clone()));

    let state = AppState {
        relay: Arc::new(UploadAndTagUseCase::from_config(&config, store, tagging)),
        config,
    };

    TestApp {
        app: create_router(state),
        uploads_dir,
        calls,
        tmp,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_bytes(res: axum::response::Response) -> Vec<u8> {
    to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body")
        .to_vec()
}

pub async fn read_text(res: axum::response::Response) -> String {
    String::from_utf8(read_bytes(res).await).expect("invalid utf8")
}

pub fn assert_status(status: StatusCode, expected: StatusCode) {
    assert_eq!(status, expected, "expected {}, got {}", expected, status);
}

/// Multipart body with one file part named `field`.
pub fn multipart_file_body(field: &str, file_name: &str, content: &[u8]) -> (String, Vec<u8>) {
    let boundary = format!("----relay-boundary-{}", Uuid::now_v7());
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());

    (boundary, body)
}

pub fn upload_request(boundary: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            axum::http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .expect("failed to build upload request")
}

pub async fn upload_file(app: &Router, file_name: &str, content: &[u8]) -> axum::response::Response {
    let (boundary, body) = multipart_file_body("file", file_name, content);
    send(app, upload_request(&boundary, body)).await
}

pub fn stored_file_names(dir: &std::path::Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        Err(_) => Vec::new(),
    }
}
