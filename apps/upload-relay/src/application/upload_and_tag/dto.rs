use crate::domain::upload::value_objects::UploadFileName;
use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UploadAndTagRequest {
    pub file_name: UploadFileName,
    pub data: Bytes,
}
