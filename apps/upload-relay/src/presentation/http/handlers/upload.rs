use crate::{
    application::upload_and_tag::dto::UploadAndTagRequest,
    domain::upload::{errors::UploadError, value_objects::UploadFileName},
    presentation::http::{errors::AppError, state::AppState, views::ResultsTemplate},
};
use askama::Template;
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Html,
};

/// Name of the form field carrying the upload.
pub const FILE_FIELD: &str = "file";

/// Pull the first `file` part that carries a filename out of the form.
///
/// A missing part or a malformed body is reported as
/// [`UploadError::MissingFile`], which renders as a server error like every
/// other failure of the upload flow.
async fn extract_file(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<UploadAndTagRequest, UploadError> {
    let mut multipart = multipart.map_err(|e| UploadError::MissingFile(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::MissingFile(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            return Err(UploadError::MissingFile(format!(
                "field '{}' is not a file",
                FILE_FIELD
            )));
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| UploadError::MissingFile(e.body_text()))?;

        return Ok(UploadAndTagRequest {
            file_name: UploadFileName::new(file_name),
            data,
        });
    }

    Err(UploadError::MissingFile(format!(
        "no '{}' field in form",
        FILE_FIELD
    )))
}

pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    tracing::info!("Upload handler called");

    state.relay.prepare_storage().await?;

    let request = extract_file(multipart).await?;

    let result = state.relay.execute(request).await?;

    let page = ResultsTemplate {
        url: result.secure_url,
        tags: result.tags,
    };
    Ok(Html(page.render()?))
}
