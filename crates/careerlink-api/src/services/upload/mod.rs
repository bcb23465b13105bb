//! Upload intake: validation, naming and storage of category uploads.

mod service;

pub use service::UploadIntakeService;
