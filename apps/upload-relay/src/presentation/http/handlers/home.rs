use crate::presentation::http::{errors::AppError, views::IndexTemplate};
use askama::Template;
use axum::response::Html;

pub async fn index() -> Result<Html<String>, AppError> {
    Ok(Html(IndexTemplate { error: None }.render()?))
}
