use crate::error::{ErrorResponse, HttpAppError};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use careerlink_core::{AppError, StoredFile, StoredFileResponse, UploadCategory};
use std::sync::Arc;

fn to_response(state: &AppState, stored: StoredFile) -> Result<StoredFileResponse, HttpAppError> {
    let url = state
        .uploads
        .build_access_url(Some(&stored.filename), stored.category)
        .ok_or_else(|| AppError::Internal("Stored file has no filename".to_string()))?;

    Ok(StoredFileResponse {
        filename: stored.filename,
        category: stored.category,
        url,
        size: stored.size,
    })
}

#[utoipa::path(
    post,
    path = "/api/v0/uploads/{category}",
    tag = "uploads",
    params(
        ("category" = String, Path, description = "Upload category: profilePhoto, resume, idCard, coverLetter or companyDocument")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "One file in a field named after the category"),
    responses(
        (status = 201, description = "File stored", body = StoredFileResponse),
        (status = 400, description = "Unknown category, malformed body or more than one file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "File type not allowed for this category", body = ErrorResponse),
        (status = 500, description = "File could not be stored", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request_id, multipart),
    fields(request_id = %request_id.0, operation = "upload_file")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(category): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category: UploadCategory = category.parse()?;
    let file = extract_multipart_file(multipart?, category, &state.uploads).await?;

    let stored = state.uploads.accept(category, file).await?;
    let response = to_response(&state, stored)?;

    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    put,
    path = "/api/v0/uploads/{category}/{filename}",
    tag = "uploads",
    params(
        ("category" = String, Path, description = "Upload category"),
        ("filename" = String, Path, description = "Stored filename being replaced")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "One file in a field named after the category"),
    responses(
        (status = 201, description = "New file stored; the previous one is removed", body = StoredFileResponse),
        (status = 400, description = "Unknown category, malformed body or more than one file", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 415, description = "File type not allowed for this category", body = ErrorResponse),
        (status = 500, description = "File could not be stored", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, request_id, multipart),
    fields(request_id = %request_id.0, operation = "replace_file")
)]
pub async fn replace_file(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path((category, previous)): Path<(String, String)>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let category: UploadCategory = category.parse()?;
    let file = extract_multipart_file(multipart?, category, &state.uploads).await?;

    let stored = state
        .uploads
        .replace_upload(category, file, Some(&previous))
        .await?;
    let response = to_response(&state, stored)?;

    Ok((StatusCode::CREATED, Json(response)))
}
