use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::UploadError;

const IMAGE_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

const DOCUMENT_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Purpose of an upload.
///
/// The category decides where a file lands on disk, which content types are
/// accepted, and the prefix of the generated filename. The identifier is also
/// the multipart field name clients must use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum UploadCategory {
    ProfilePhoto,
    Resume,
    IdCard,
    CoverLetter,
    CompanyDocument,
}

impl UploadCategory {
    pub const ALL: [UploadCategory; 5] = [
        UploadCategory::ProfilePhoto,
        UploadCategory::Resume,
        UploadCategory::IdCard,
        UploadCategory::CoverLetter,
        UploadCategory::CompanyDocument,
    ];

    /// Identifier used as multipart field name and filename prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadCategory::ProfilePhoto => "profilePhoto",
            UploadCategory::Resume => "resume",
            UploadCategory::IdCard => "idCard",
            UploadCategory::CoverLetter => "coverLetter",
            UploadCategory::CompanyDocument => "companyDocument",
        }
    }

    /// Subdirectory under the upload root, also the public `/uploads/{dir}` segment.
    pub fn directory(&self) -> &'static str {
        match self {
            UploadCategory::ProfilePhoto => "profiles",
            UploadCategory::Resume => "resumes",
            UploadCategory::IdCard => "idcards",
            UploadCategory::CoverLetter => "coverletters",
            UploadCategory::CompanyDocument => "companydoc",
        }
    }

    /// Segment of the `/upload/{alias}` public route.
    pub fn alias(&self) -> &'static str {
        match self {
            UploadCategory::ProfilePhoto => "profile",
            UploadCategory::Resume => "resume",
            UploadCategory::IdCard => "idcard",
            UploadCategory::CoverLetter => "coverletter",
            UploadCategory::CompanyDocument => "companydoc",
        }
    }

    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            UploadCategory::ProfilePhoto | UploadCategory::IdCard => IMAGE_CONTENT_TYPES,
            UploadCategory::Resume
            | UploadCategory::CoverLetter
            | UploadCategory::CompanyDocument => DOCUMENT_CONTENT_TYPES,
        }
    }

    /// Message returned to clients when the declared type is not accepted.
    pub fn unsupported_type_message(&self) -> String {
        match self {
            UploadCategory::ProfilePhoto => {
                "Only JPEG, JPG, PNG, and WEBP images are allowed for profile photos".to_string()
            }
            UploadCategory::IdCard => {
                "Only JPEG, JPG, PNG, and WEBP images are allowed for ID cards".to_string()
            }
            UploadCategory::Resume => {
                "Only PDF, DOC, and DOCX files are allowed for resumes".to_string()
            }
            UploadCategory::CoverLetter => {
                "Only PDF, DOC, and DOCX files are allowed for cover letters".to_string()
            }
            UploadCategory::CompanyDocument => {
                "Only PDF, DOC, and DOCX files are allowed for company documents".to_string()
            }
        }
    }

    /// Whether `content_type` is on this category's allow-list.
    ///
    /// Parameters such as `; charset=binary` are ignored and the comparison is
    /// case-insensitive.
    pub fn accepts(&self, content_type: &str) -> bool {
        let normalized = normalize_mime_type(content_type).to_lowercase();
        self.allowed_content_types()
            .iter()
            .any(|allowed| *allowed == normalized)
    }

    /// Resolve a public path segment: either the directory or the alias form.
    pub fn from_public_segment(segment: &str) -> Option<UploadCategory> {
        Self::ALL
            .into_iter()
            .find(|c| c.directory() == segment || c.alias() == segment)
    }
}

/// Strip MIME parameters (e.g. "image/png; q=1" -> "image/png").
pub fn normalize_mime_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
}

impl FromStr for UploadCategory {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .or_else(|| Self::from_public_segment(s))
            .ok_or_else(|| UploadError::InvalidCategory(s.to_string()))
    }
}

impl Display for UploadCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
