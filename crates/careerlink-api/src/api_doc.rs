//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use careerlink_core::models;

/// Returns the OpenAPI spec served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CareerLink Upload API",
        version = "0.1.0",
        description = "Upload intake for profile photos, resumes, ID cards, cover letters and company documents. Files are validated per category, stored under generated names and served back from /uploads/{dir}/{filename}."
    ),
    paths(
        handlers::upload::upload_file,
        handlers::upload::replace_file,
        handlers::file_delete::delete_file,
        handlers::file_get::get_file,
        handlers::file_get::get_file_by_alias,
    ),
    components(
        schemas(
            models::StoredFileResponse,
            models::UploadCategory,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "Upload, replace and delete files by category"),
        (name = "files", description = "Serve stored files")
    )
)]
pub struct ApiDoc;
