use once_cell::sync::Lazy;
use regex::Regex;

pub const MAX_CV_BYTES: u64 = 5 * 1024 * 1024;

pub const PDF_TYPE: &str = "application/pdf";
pub const DOCX_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const CV_TYPE_ERROR: &str = "Solo se permiten archivos PDF o DOCX";
pub const CV_SIZE_ERROR: &str = "El archivo no debe superar los 5 MB";
pub const CV_REQUIRED_ERROR: &str = "El CV es obligatorio";
pub const EMAIL_ERROR: &str = "Correo electrónico no válido";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Basic `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(&email.to_lowercase())
}

/// Why a selected file cannot be used as a CV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRejection {
    Type,
    Size,
}

impl FileRejection {
    pub fn message(self) -> &'static str {
        match self {
            FileRejection::Type => CV_TYPE_ERROR,
            FileRejection::Size => CV_SIZE_ERROR,
        }
    }
}

/// Type is checked before size, so a large PNG reports the type error.
pub fn check_cv_file(mime_type: &str, size: u64) -> Result<(), FileRejection> {
    if mime_type != PDF_TYPE && mime_type != DOCX_TYPE {
        return Err(FileRejection::Type);
    }
    if size > MAX_CV_BYTES {
        return Err(FileRejection::Size);
    }
    Ok(())
}
