//! CareerLink API Library
//!
//! This crate provides the upload intake service, the HTTP handlers and
//! middleware around it, and application setup.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
mod services;
pub mod setup;
mod telemetry;
mod utils;

pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use middleware::RequestId;
pub use services::upload::UploadIntakeService;
