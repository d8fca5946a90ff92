use crate::{application::upload_and_tag::use_case::UploadAndTagUseCase, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<UploadAndTagUseCase>,
    pub config: Config,
}
