//! Student-to-job match scoring and the workflows built on it.
//!
//! The scorer is a pure function of a student profile and a job posting. The service and
//! router wrap it with repository lookups, job ranking, and the apply gate.

pub mod domain;
pub mod matching;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AcademicRecord, CustomRequirement, DegreeRequirement, GradeRecord, GradeRequirement,
    HigherEducation, JobEligibility, JobId, JobPosting, JobRequiredSkill, JobStatus, LegacySkill,
    LegacySkillStatus, SkillRef, StudentId, StudentProfile, TechnicalSkill,
};
pub use matching::{MatchConfig, MatchResult, MatchScorer};
pub use repository::{JobRepository, RepositoryError, StudentRepository};
pub use router::placement_router;
pub use service::{ApplicationGate, JobMatchView, MatchServiceError, PlacementMatchService};
