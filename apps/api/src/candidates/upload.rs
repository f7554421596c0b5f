//! Multipart intake: reads the form's text fields and streams the `cv` file
//! part to the upload directory.
//!
//! Policy:
//! - one file per submission, under the `cv` field; extra `cv` parts are drained
//! - an empty file input (no name, no bytes) counts as no file
//! - only PDF and DOCX content types; anything else fails the request with 400
//! - at most `MAX_CV_BYTES`; an oversized part is removed from disk and fails with 413
//! - stored as `<unix millis>-<original basename>` in a directory that must exist

use std::path::{Path, PathBuf};

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::models::candidate::NewCandidate;

pub const CV_FIELD: &str = "cv";

/// 5 MB ceiling on the CV file itself.
pub const MAX_CV_BYTES: u64 = 5 * 1024 * 1024;

/// Request body limit: the CV ceiling plus headroom for the text fields.
pub const MAX_REQUEST_BYTES: usize = MAX_CV_BYTES as usize + 1024 * 1024;

pub const ALLOWED_CV_TYPES: &[&str] = &[
    "application/pdf",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const CV_REQUIRED_MESSAGE: &str = "El CV es obligatorio";
pub const CV_TYPE_MESSAGE: &str = "Solo se permiten archivos PDF o DOCX";
pub const CV_TOO_LARGE_MESSAGE: &str = "El archivo no debe superar los 5 MB";

/// A CV that has been fully written to the upload directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub path: PathBuf,
    pub content_type: String,
    pub size: u64,
}

/// Text fields as sent by the form. Absent fields stay empty.
#[derive(Debug, Clone, Default)]
pub struct CandidateFields {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub education: String,
    pub experience: String,
}

impl CandidateFields {
    fn slot(&mut self, field_name: &str) -> Option<&mut String> {
        match field_name {
            "name" => Some(&mut self.name),
            "lastName" => Some(&mut self.last_name),
            "email" => Some(&mut self.email),
            "phone" => Some(&mut self.phone),
            "address" => Some(&mut self.address),
            "education" => Some(&mut self.education),
            "experience" => Some(&mut self.experience),
            _ => None,
        }
    }

    pub fn into_new_candidate(self, cv: &StoredFile) -> NewCandidate {
        NewCandidate {
            name: self.name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            education: self.education,
            experience: self.experience,
            cv_path: cv.path.to_string_lossy().into_owned(),
        }
    }
}

#[derive(Debug)]
pub struct Submission {
    pub fields: CandidateFields,
    pub cv: Option<StoredFile>,
}

/// Fails startup if the upload directory is missing. It is never created here.
pub async fn ensure_upload_dir(dir: &Path) -> anyhow::Result<()> {
    let metadata = tokio::fs::metadata(dir).await.map_err(|e| {
        anyhow::anyhow!("Upload directory '{}' is not accessible: {e}", dir.display())
    })?;
    if !metadata.is_dir() {
        anyhow::bail!("Upload path '{}' is not a directory", dir.display());
    }
    Ok(())
}

/// Drains the multipart stream, storing the first `cv` part on disk.
pub async fn receive_submission(
    multipart: &mut Multipart,
    upload_dir: &Path,
) -> Result<Submission, AppError> {
    let mut fields = CandidateFields::default();
    let mut cv: Option<StoredFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == CV_FIELD {
            if cv.is_some() {
                debug!("Ignoring additional '{CV_FIELD}' part");
                field.bytes().await.map_err(multipart_error)?;
                continue;
            }
            cv = store_cv(field, upload_dir).await?;
            continue;
        }

        match fields.slot(&field_name) {
            Some(slot) => *slot = field.text().await.map_err(multipart_error)?,
            None => {
                field.bytes().await.map_err(multipart_error)?;
            }
        }
    }

    Ok(Submission { fields, cv })
}

/// Returns `None` for the part a browser sends when the file input is left
/// empty: no file name and no content.
async fn store_cv(
    mut field: Field<'_>,
    upload_dir: &Path,
) -> Result<Option<StoredFile>, AppError> {
    let content_type = field.content_type().unwrap_or("").to_string();
    let original_name = field.file_name().unwrap_or("").to_string();

    let first_chunk = field.chunk().await.map_err(multipart_error)?;
    if first_chunk.is_none() && original_name.is_empty() {
        debug!("Empty '{CV_FIELD}' part treated as no file");
        return Ok(None);
    }

    if !is_allowed_content_type(&content_type) {
        return Err(AppError::UnsupportedFileType(content_type));
    }

    let file_name = stored_file_name(chrono::Utc::now().timestamp_millis(), &original_name);
    let path = upload_dir.join(file_name);

    let mut file = File::create(&path).await?;
    let mut size: u64 = 0;

    let streamed = async {
        let mut next = first_chunk;
        while let Some(chunk) = next {
            size += chunk.len() as u64;
            if size > MAX_CV_BYTES {
                return Err(AppError::FileTooLarge);
            }
            file.write_all(&chunk).await?;
            next = field.chunk().await.map_err(multipart_error)?;
        }
        file.flush().await?;
        Ok::<(), AppError>(())
    }
    .await;

    if let Err(e) = streamed {
        drop(file);
        if let Err(remove_err) = tokio::fs::remove_file(&path).await {
            warn!("Failed to remove partial upload {}: {remove_err}", path.display());
        }
        return Err(e);
    }

    debug!("Stored CV at {} ({size} bytes, {content_type})", path.display());

    Ok(Some(StoredFile {
        path,
        content_type,
        size,
    }))
}

pub fn is_allowed_content_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    ALLOWED_CV_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(essence))
}

/// `<millis>-<basename>`. Client-supplied directory components are dropped.
pub fn stored_file_name(millis: i64, original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();
    let base = match base {
        "" | "." | ".." => CV_FIELD,
        other => other,
    };
    format!("{millis}-{base}")
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::FileTooLarge
    } else {
        AppError::InvalidMultipart(e.body_text())
    }
}
