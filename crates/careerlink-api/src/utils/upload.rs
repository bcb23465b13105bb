//! Common utilities for file upload handlers

use axum::extract::Multipart;
use careerlink_core::{AppError, IncomingFile, UploadCategory, UploadError};

use crate::error::HttpAppError;
use crate::services::upload::UploadIntakeService;

/// Extract the single file sent for `category` from a multipart form.
///
/// The file must arrive in the field named after the category identifier. The
/// declared content type is checked before the body is read, and the body is
/// read chunk by chunk so an oversized file is rejected as soon as it crosses
/// the limit. Non-file fields are skipped.
pub async fn extract_multipart_file(
    mut multipart: Multipart,
    category: UploadCategory,
    service: &UploadIntakeService,
) -> Result<IncomingFile, HttpAppError> {
    let constraint = service.constraint(category);
    let mut file: Option<IncomingFile> = None;

    while let Some(mut field) = multipart.next_field().await? {
        let Some(original_filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let field_name = field.name().unwrap_or_default().to_string();

        if field_name != category.as_str() {
            return Err(AppError::InvalidInput(format!(
                "Unexpected field '{}'; send the file in a field named '{}'",
                field_name,
                category.as_str()
            ))
            .into());
        }
        if file.is_some() {
            return Err(UploadError::TooManyFiles(field_name).into());
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        service.check_content_type(category, &content_type)?;

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            let size = data.len() + chunk.len();
            if size > constraint.max_file_size {
                return Err(UploadError::TooLarge {
                    size,
                    max: constraint.max_file_size,
                }
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        file = Some(IncomingFile::new(original_filename, content_type, data));
    }

    file.ok_or_else(|| {
        AppError::InvalidInput(format!(
            "No file provided; send one file in a field named '{}'",
            category.as_str()
        ))
        .into()
    })
}

/// Content type served for a stored file, from its extension.
pub fn content_type_for_extension(filename: &str) -> &'static str {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
