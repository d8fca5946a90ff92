//! HTTP error handling and response conversion.
//!
//! Every failure of the upload flow renders the home page with a short
//! message and the same status code. The detailed cause only goes to logs.

use super::views::IndexTemplate;
use crate::domain::upload::errors::UploadError;
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// A step of the upload workflow failed (500).
    Upload(UploadError),

    /// A page template failed to render (500).
    Render(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upload(err) => write!(f, "{}", err),
            Self::Render(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl AppError {
    /// Get the HTTP status code for this error.
    ///
    /// Failures are deliberately not distinguished by status.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Get a user-safe error message (without implementation details).
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Upload(err) => err.user_message(),
            Self::Render(_) => "Failed to render page",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        tracing::error!("error={}", self);

        let page = IndexTemplate {
            error: Some(message.to_string()),
        };
        match page.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(err) => {
                tracing::error!(render_error = %err, "Failed to render error page");
                (status, message).into_response()
            }
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Upload(err)
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::Render(err.to_string())
    }
}
