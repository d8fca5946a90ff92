pub mod upload_and_tag;
