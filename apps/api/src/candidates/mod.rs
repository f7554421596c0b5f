// Candidate intake: multipart upload → disk, then a single row insert.

pub mod handlers;
pub mod repository;
pub mod upload;
