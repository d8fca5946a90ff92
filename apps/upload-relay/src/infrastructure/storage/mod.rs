pub mod local_disk_store;
pub mod traits;
