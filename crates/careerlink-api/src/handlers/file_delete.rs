use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use careerlink_core::UploadCategory;
use std::sync::Arc;

#[utoipa::path(
    delete,
    path = "/api/v0/uploads/{category}/{filename}",
    tag = "uploads",
    params(
        ("category" = String, Path, description = "Upload category"),
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 204, description = "File removed, or there was nothing to remove"),
        (status = 400, description = "Unknown category or invalid filename", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "delete_file"))]
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<StatusCode, HttpAppError> {
    let category: UploadCategory = category.parse()?;
    state.uploads.delete_by_name(category, &filename).await?;

    Ok(StatusCode::NO_CONTENT)
}
