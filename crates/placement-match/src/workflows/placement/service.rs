use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{JobId, JobPosting, JobStatus, StudentId, StudentProfile};
use super::matching::{MatchConfig, MatchResult, MatchScorer};
use super::repository::{JobRepository, RepositoryError, StudentRepository};

pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Service composing the profile and job repositories with the match scorer.
pub struct PlacementMatchService<S, J> {
    students: Arc<S>,
    jobs: Arc<J>,
    scorer: Arc<MatchScorer>,
}

impl<S, J> PlacementMatchService<S, J>
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    pub fn new(students: Arc<S>, jobs: Arc<J>, config: MatchConfig) -> Self {
        Self {
            students,
            jobs,
            scorer: Arc::new(MatchScorer::new(config)),
        }
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Score caller-supplied documents without touching the repositories.
    pub fn score(
        &self,
        student: &StudentProfile,
        job: &JobPosting,
        responses: &[bool],
        today: Option<NaiveDate>,
    ) -> MatchResult {
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        self.scorer.calculate_match_on(student, job, responses, today)
    }

    /// Load a student and job and score the pair.
    pub fn match_for_job(
        &self,
        student_id: &StudentId,
        job_id: &JobId,
        responses: &[bool],
    ) -> Result<JobMatchView, MatchServiceError> {
        self.match_for_job_on(student_id, job_id, responses, Local::now().date_naive())
    }

    pub fn match_for_job_on(
        &self,
        student_id: &StudentId,
        job_id: &JobId,
        responses: &[bool],
        today: NaiveDate,
    ) -> Result<JobMatchView, MatchServiceError> {
        let student = self.load_student(student_id)?;
        let job = self.load_job(job_id)?;
        let result = self
            .scorer
            .calculate_match_on(&student, &job, responses, today);
        Ok(JobMatchView::new(&job, result))
    }

    /// Rank every open job for a student, best match first.
    pub fn recommended_jobs(
        &self,
        student_id: &StudentId,
        limit: usize,
    ) -> Result<Vec<JobMatchView>, MatchServiceError> {
        self.recommended_jobs_on(student_id, limit, Local::now().date_naive())
    }

    pub fn recommended_jobs_on(
        &self,
        student_id: &StudentId,
        limit: usize,
        today: NaiveDate,
    ) -> Result<Vec<JobMatchView>, MatchServiceError> {
        let student = self.load_student(student_id)?;
        let jobs = self.jobs.list()?;
        let considered = jobs.len();

        let mut views: Vec<JobMatchView> = jobs
            .iter()
            .filter(|job| job.is_open_on(today))
            .map(|job| {
                let result = self.scorer.calculate_match_on(&student, job, &[], today);
                JobMatchView::new(job, result)
            })
            .collect();

        views.sort_by(|left, right| {
            right
                .result
                .overall_percentage
                .cmp(&left.result.overall_percentage)
                .then_with(|| left.job_id.cmp(&right.job_id))
        });
        views.truncate(limit);

        info!(
            student = %student_id,
            considered,
            returned = views.len(),
            "ranked recommended jobs"
        );

        Ok(views)
    }

    /// Gate an application: the job must be open and the match must clear the threshold.
    pub fn check_application(
        &self,
        student_id: &StudentId,
        job_id: &JobId,
        responses: &[bool],
    ) -> Result<ApplicationGate, MatchServiceError> {
        self.check_application_on(student_id, job_id, responses, Local::now().date_naive())
    }

    pub fn check_application_on(
        &self,
        student_id: &StudentId,
        job_id: &JobId,
        responses: &[bool],
        today: NaiveDate,
    ) -> Result<ApplicationGate, MatchServiceError> {
        let student = self.load_student(student_id)?;
        let job = self.load_job(job_id)?;

        if !job.is_open_on(today) {
            warn!(
                student = %student_id,
                job = %job_id,
                status = job.status.label(),
                "apply check on closed job"
            );
            return Err(MatchServiceError::JobClosed {
                job_id: job.id.clone(),
                status: job.status,
            });
        }

        let result = self
            .scorer
            .calculate_match_on(&student, &job, responses, today);

        if !result.can_apply {
            warn!(
                student = %student_id,
                job = %job_id,
                overall = result.overall_percentage,
                "apply check rejected"
            );
            return Err(MatchServiceError::NotEligible {
                overall_percentage: result.overall_percentage,
                summary: result.summary,
            });
        }

        Ok(ApplicationGate {
            student_id: student_id.clone(),
            job_id: job.id,
            can_apply: true,
            result,
        })
    }

    fn load_student(&self, id: &StudentId) -> Result<StudentProfile, MatchServiceError> {
        self.students
            .fetch(id)?
            .ok_or_else(|| MatchServiceError::StudentNotFound(id.clone()))
    }

    fn load_job(&self, id: &JobId) -> Result<JobPosting, MatchServiceError> {
        self.jobs
            .fetch(id)?
            .ok_or_else(|| MatchServiceError::JobNotFound(id.clone()))
    }
}

/// Match result annotated with the job it was computed for.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMatchView {
    pub job_id: JobId,
    pub title: String,
    pub company: String,
    #[serde(rename = "matchDetails")]
    pub result: MatchResult,
}

impl JobMatchView {
    pub fn new(job: &JobPosting, result: MatchResult) -> Self {
        Self {
            job_id: job.id.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            result,
        }
    }
}

/// Positive outcome of an apply check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGate {
    pub student_id: StudentId,
    pub job_id: JobId,
    pub can_apply: bool,
    #[serde(rename = "matchDetails")]
    pub result: MatchResult,
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("job {job_id} is not accepting applications ({status})")]
    JobClosed { job_id: JobId, status: JobStatus },
    #[error("match of {overall_percentage}% is below the application threshold")]
    NotEligible {
        overall_percentage: u8,
        summary: Vec<String>,
    },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
