use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use placement_match::error::AppError;
use placement_match::workflows::placement::{
    JobId, JobPosting, JobRepository, RepositoryError, StudentId, StudentProfile,
    StudentRepository,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRepository {
    records: Arc<RwLock<HashMap<StudentId, StudentProfile>>>,
}

impl InMemoryStudentRepository {
    pub(crate) fn with_profiles(profiles: Vec<StudentProfile>) -> Self {
        let records = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl StudentRepository for InMemoryStudentRepository {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("student store lock poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    records: Arc<RwLock<Vec<JobPosting>>>,
}

impl InMemoryJobRepository {
    pub(crate) fn with_jobs(jobs: Vec<JobPosting>) -> Self {
        Self {
            records: Arc::new(RwLock::new(jobs)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl JobRepository for InMemoryJobRepository {
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("job store lock poisoned".to_string()))?;
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("job store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

/// Contents of a `--seed` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SeedDocument {
    pub(crate) students: Vec<StudentProfile>,
    pub(crate) jobs: Vec<JobPosting>,
}

/// Either one job document or an array of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum JobDocuments {
    Many(Vec<JobPosting>),
    One(Box<JobPosting>),
}

impl JobDocuments {
    pub(crate) fn into_vec(self) -> Vec<JobPosting> {
        match self {
            JobDocuments::Many(jobs) => jobs,
            JobDocuments::One(job) => vec![*job],
        }
    }
}

pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| AppError::Document {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
