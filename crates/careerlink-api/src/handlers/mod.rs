pub mod file_delete;
pub mod file_get;
pub mod upload;
