//! Serves stored files at their public URLs.

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::content_type_for_extension;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};
use careerlink_core::{AppError, UploadCategory};
use futures::StreamExt;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/uploads/{dir}/{filename}",
    tag = "files",
    params(
        ("dir" = String, Path, description = "Category directory, e.g. resumes or idcards"),
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    Path((segment, filename)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    serve(&state, &segment, &filename).await
}

#[utoipa::path(
    get,
    path = "/upload/{alias}/{filename}",
    tag = "files",
    params(
        ("alias" = String, Path, description = "Category alias, e.g. resume or idcard"),
        ("filename" = String, Path, description = "Stored filename")
    ),
    responses(
        (status = 200, description = "File contents"),
        (status = 404, description = "File not found", body = ErrorResponse)
    )
)]
pub async fn get_file_by_alias(
    State(state): State<Arc<AppState>>,
    Path((alias, filename)): Path<(String, String)>,
) -> Result<Response, HttpAppError> {
    serve(&state, &alias, &filename).await
}

async fn serve(state: &AppState, segment: &str, filename: &str) -> Result<Response, HttpAppError> {
    let category = UploadCategory::from_public_segment(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown upload path: {}", segment)))?;

    let storage = state.uploads.storage();
    let size = storage.content_length(category, filename).await?;
    let stream = storage.download_stream(category, filename).await?;

    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for_extension(filename))
        .header(header::CONTENT_LENGTH, size)
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(body_stream))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })?;

    Ok(response)
}
