//! Candidate persistence.
//!
//! `AppState` holds an `Arc<dyn CandidateRepository>` so handlers never reach
//! for a process-wide database client. The only operation is `create`:
//! records are written once and never read back, updated or deleted here.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::candidate::{Candidate, NewCandidate};

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Inserts a single candidate row and returns it with its assigned id.
    async fn create(&self, candidate: NewCandidate) -> Result<Candidate, sqlx::Error>;
}

/// PostgreSQL-backed repository. Schema lives in `migrations/`.
pub struct PgCandidateRepository {
    pool: PgPool,
}

impl PgCandidateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateRepository for PgCandidateRepository {
    async fn create(&self, candidate: NewCandidate) -> Result<Candidate, sqlx::Error> {
        sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates
                (name, last_name, email, phone, address, education, experience, cv_path)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, last_name, email, phone, address, education, experience, cv_path
            "#,
        )
        .bind(candidate.name)
        .bind(candidate.last_name)
        .bind(candidate.email)
        .bind(candidate.phone)
        .bind(candidate.address)
        .bind(candidate.education)
        .bind(candidate.experience)
        .bind(candidate.cv_path)
        .fetch_one(&self.pool)
        .await
    }
}
