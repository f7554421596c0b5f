use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::candidates::upload::receive_submission;
use crate::errors::AppError;
use crate::models::candidate::Candidate;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateCandidateResponse {
    pub success: bool,
    pub data: Candidate,
}

/// POST /api/candidates
///
/// Multipart body with the candidate's text fields and a `cv` file part.
/// The file is written before the row is inserted; a failed insert leaves it on disk.
/// A body that is not multipart at all carries no CV and is answered as such.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<CreateCandidateResponse>), AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Request without a multipart body: {rejection}");
        AppError::CvRequired
    })?;
    let submission = receive_submission(&mut multipart, &state.config.upload_dir).await?;
    let cv = submission.cv.ok_or(AppError::CvRequired)?;

    info!(
        email = %submission.fields.email,
        cv_path = %cv.path.display(),
        cv_size = cv.size,
        cv_type = %cv.content_type,
        "Creating candidate"
    );

    let candidate = state
        .candidates
        .create(submission.fields.into_new_candidate(&cv))
        .await?;

    info!(candidate_id = candidate.id, "Created candidate");

    Ok((
        StatusCode::CREATED,
        Json(CreateCandidateResponse {
            success: true,
            data: candidate,
        }),
    ))
}
