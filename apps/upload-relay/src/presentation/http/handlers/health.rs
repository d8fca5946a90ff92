use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::io::ErrorKind;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    uploads_dir: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let uploads_dir = match tokio::fs::metadata(&state.config.uploads_dir).await {
        Ok(meta) if meta.is_dir() => "up",
        Ok(_) => {
            tracing::error!(
                "Health check failed: {} is not a directory",
                state.config.uploads_dir.display()
            );
            "down"
        }
        // Created by the first upload.
        Err(e) if e.kind() == ErrorKind::NotFound => "pending",
        Err(e) => {
            tracing::error!("Health check failed: uploads directory unreadable: {}", e);
            "down"
        }
    };

    let (status, code) = if uploads_dir == "down" {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    } else {
        ("healthy", StatusCode::OK)
    };

    let response = HealthResponse {
        status,
        uploads_dir,
        version: env!("CARGO_PKG_VERSION"),
    };

    (code, Json(response))
}
