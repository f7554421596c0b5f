//! Candidate intake form state.
//!
//! Holds the seven text fields, the selected CV and the per-field errors, and
//! drives a single submission through an `IntakeClient`. Successful
//! submissions reset the form; failed ones keep every value for another try.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::client::{CandidateRecord, IntakeClient};
use crate::validation::{check_cv_file, is_valid_email, CV_REQUIRED_ERROR, EMAIL_ERROR};

pub const SUCCESS_BANNER: &str = "Candidato añadido exitosamente";
pub const FAILURE_BANNER: &str = "Error al añadir el candidato. Inténtalo de nuevo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    LastName,
    Email,
    Phone,
    Address,
    Education,
    Experience,
    Cv,
}

impl Field {
    pub const TEXT: [Field; 7] = [
        Field::Name,
        Field::LastName,
        Field::Email,
        Field::Phone,
        Field::Address,
        Field::Education,
        Field::Experience,
    ];

    /// Multipart field name expected by the intake endpoint.
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Address => "address",
            Field::Education => "education",
            Field::Experience => "experience",
            Field::Cv => "cv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Nombre",
            Field::LastName => "Apellido",
            Field::Email => "Correo Electrónico",
            Field::Phone => "Teléfono",
            Field::Address => "Dirección",
            Field::Education => "Educación",
            Field::Experience => "Experiencia",
            Field::Cv => "CV (PDF o DOCX, máx. 5MB)",
        }
    }

    fn required_message(self) -> &'static str {
        match self {
            Field::Name => "El nombre es obligatorio",
            Field::LastName => "El apellido es obligatorio",
            Field::Email => EMAIL_ERROR,
            Field::Phone => "El teléfono es obligatorio",
            Field::Address => "La dirección es obligatoria",
            Field::Education => "La educación es obligatoria",
            Field::Experience => "La experiencia es obligatoria",
            Field::Cv => CV_REQUIRED_ERROR,
        }
    }
}

/// A file picked for upload. `mime_type` is the declared type, guessed from
/// the extension the same way a browser would.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime_type,
            size: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success,
    Failure,
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Banner::Success => f.write_str(SUCCESS_BANNER),
            Banner::Failure => f.write_str(FAILURE_BANNER),
        }
    }
}

/// A validated snapshot of the form, ready to send.
#[derive(Debug, Clone)]
pub struct CandidateSubmission {
    pub values: BTreeMap<Field, String>,
    pub cv: SelectedFile,
}

impl CandidateSubmission {
    pub fn text_fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        Field::TEXT
            .iter()
            .map(|f| (f.key(), self.values.get(f).map(String::as_str).unwrap_or("")))
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid,
    Created(CandidateRecord),
    Failed,
}

#[derive(Debug, Default, Clone)]
pub struct CandidateForm {
    values: BTreeMap<Field, String>,
    cv: Option<SelectedFile>,
    errors: BTreeMap<Field, String>,
    banner: Option<Banner>,
}

impl CandidateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        if field != Field::Cv {
            self.values.insert(field, value.into());
        }
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn cv(&self) -> Option<&SelectedFile> {
        self.cv.as_ref()
    }

    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Accepts or rejects a file the moment it is picked. A rejected file
    /// clears any previous selection.
    pub fn select_file(&mut self, file: SelectedFile) {
        match check_cv_file(&file.mime_type, file.size) {
            Ok(()) => {
                self.errors.remove(&Field::Cv);
                self.cv = Some(file);
            }
            Err(rejection) => {
                warn!(
                    "Rejected CV '{}' ({}, {} bytes)",
                    file.file_name, file.mime_type, file.size
                );
                self.errors
                    .insert(Field::Cv, rejection.message().to_string());
                self.cv = None;
            }
        }
    }

    /// Replaces the error map with one message per invalid field.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();

        for field in Field::TEXT {
            let value = self.value(field);
            let invalid = value.is_empty() || (field == Field::Email && !is_valid_email(value));
            if invalid {
                errors.insert(field, field.required_message().to_string());
            }
        }
        if self.cv.is_none() {
            errors.insert(Field::Cv, Field::Cv.required_message().to_string());
        }

        self.errors = errors;
        self.errors.is_empty()
    }

    pub async fn submit<C>(&mut self, client: &C) -> SubmitOutcome
    where
        C: IntakeClient + ?Sized,
    {
        self.banner = None;
        if !self.validate() {
            return SubmitOutcome::Invalid;
        }
        let Some(cv) = self.cv.clone() else {
            return SubmitOutcome::Invalid;
        };
        let submission = CandidateSubmission {
            values: self.values.clone(),
            cv,
        };

        match client.submit(&submission).await {
            Ok(record) => {
                info!("Candidate {} created", record.id);
                self.reset();
                self.banner = Some(Banner::Success);
                SubmitOutcome::Created(record)
            }
            Err(e) => {
                warn!("Candidate submission failed: {e}");
                self.banner = Some(Banner::Failure);
                SubmitOutcome::Failed
            }
        }
    }

    fn reset(&mut self) {
        self.values.clear();
        self.cv = None;
        self.errors.clear();
    }
}
