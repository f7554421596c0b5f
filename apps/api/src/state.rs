use std::sync::Arc;

use crate::candidates::repository::CandidateRepository;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Candidate store. `PgCandidateRepository` in production.
    pub candidates: Arc<dyn CandidateRepository>,
    pub config: Config,
}
