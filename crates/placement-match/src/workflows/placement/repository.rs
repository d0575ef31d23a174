use super::domain::{JobId, JobPosting, StudentId, StudentProfile};

/// Read access to student profiles, joined with skill reference data.
pub trait StudentRepository: Send + Sync {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError>;
}

/// Read access to job postings.
pub trait JobRepository: Send + Sync {
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
