pub mod storage;
pub mod tagging;
