//! Transport for form submissions.
//!
//! `CandidateForm::submit` talks to an `IntakeClient`; `HttpIntakeClient` is
//! the real one and posts a multipart body to `POST /api/candidates`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::form::CandidateSubmission;

pub const INTAKE_PATH: &str = "/api/candidates";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not read CV file: {0}")]
    File(#[from] std::io::Error),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server responded with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// Candidate record as returned by the intake endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub education: String,
    pub experience: String,
    pub cv_path: String,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    data: CandidateRecord,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[async_trait]
pub trait IntakeClient: Send + Sync {
    /// Sends one submission. No retries.
    async fn submit(&self, submission: &CandidateSubmission) -> Result<CandidateRecord, SubmitError>;
}

#[derive(Clone)]
pub struct HttpIntakeClient {
    client: Client,
    endpoint: String,
}

impl HttpIntakeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), INTAKE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl IntakeClient for HttpIntakeClient {
    async fn submit(&self, submission: &CandidateSubmission) -> Result<CandidateRecord, SubmitError> {
        let bytes = tokio::fs::read(&submission.cv.path).await?;
        let cv = Part::bytes(bytes)
            .file_name(submission.cv.file_name.clone())
            .mime_str(&submission.cv.mime_type)?;

        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value.to_string());
        }
        let form = form.part("cv", cv);

        debug!("POST {}", self.endpoint);
        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let created: CreatedResponse = response.json().await?;
        Ok(created.data)
    }
}
