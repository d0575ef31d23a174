use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::placement::domain::{
    AcademicRecord, CustomRequirement, GradeRecord, GradeRequirement, JobEligibility, JobId,
    JobPosting, JobRequiredSkill, JobStatus, SkillRef, StudentId, StudentProfile, TechnicalSkill,
};
use crate::workflows::placement::repository::{JobRepository, RepositoryError, StudentRepository};
use crate::workflows::placement::{placement_router, MatchConfig, PlacementMatchService};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date")
}

pub(super) fn required_skill(id: &str, name: &str, level: u8) -> JobRequiredSkill {
    JobRequiredSkill {
        skill_ref: SkillRef::new(id, name),
        required: true,
        proficiency_level: level,
    }
}

pub(super) fn optional_skill(id: &str, name: &str, level: u8) -> JobRequiredSkill {
    JobRequiredSkill {
        required: false,
        ..required_skill(id, name, level)
    }
}

pub(super) fn technical(id: &str, name: &str, rating: u8) -> TechnicalSkill {
    TechnicalSkill {
        skill_id: id.to_string(),
        skill_name: name.to_string(),
        self_rating: rating,
    }
}

pub(super) fn react_job() -> JobPosting {
    JobPosting {
        id: JobId("job-react".to_string()),
        title: "Frontend Intern".to_string(),
        company: "Acme Labs".to_string(),
        status: JobStatus::Active,
        required_skills: vec![required_skill("skill-react", "React", 2)],
        ..JobPosting::default()
    }
}

pub(super) fn react_student() -> StudentProfile {
    StudentProfile {
        id: StudentId("stu-1".to_string()),
        technical_skills: vec![TechnicalSkill {
            skill_id: String::new(),
            skill_name: "React".to_string(),
            self_rating: 3,
        }],
        ..StudentProfile::default()
    }
}

pub(super) fn graded_student(tenth: f64, twelfth: f64) -> StudentProfile {
    StudentProfile {
        academic: AcademicRecord {
            tenth_grade: GradeRecord { percentage: tenth },
            twelfth_grade: GradeRecord {
                percentage: twelfth,
            },
            ..AcademicRecord::default()
        },
        ..react_student()
    }
}

pub(super) fn tenth_grade_rule(min_percentage: f64) -> JobEligibility {
    JobEligibility {
        tenth_grade: GradeRequirement {
            required: true,
            min_percentage,
        },
        ..JobEligibility::default()
    }
}

pub(super) fn requirement(text: &str, is_mandatory: bool) -> CustomRequirement {
    CustomRequirement {
        text: text.to_string(),
        is_mandatory,
    }
}

pub(super) fn job(id: &str, title: &str) -> JobPosting {
    JobPosting {
        id: JobId(id.to_string()),
        title: title.to_string(),
        ..react_job()
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryStudents {
    pub(super) records: Arc<Mutex<HashMap<StudentId, StudentProfile>>>,
}

impl MemoryStudents {
    pub(super) fn with(profiles: Vec<StudentProfile>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.records.lock().expect("student mutex poisoned");
            for profile in profiles {
                guard.insert(profile.id.clone(), profile);
            }
        }
        store
    }
}

impl StudentRepository for MemoryStudents {
    fn fetch(&self, id: &StudentId) -> Result<Option<StudentProfile>, RepositoryError> {
        let guard = self.records.lock().expect("student mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    pub(super) records: Arc<Mutex<Vec<JobPosting>>>,
}

impl MemoryJobs {
    pub(super) fn with(jobs: Vec<JobPosting>) -> Self {
        Self {
            records: Arc::new(Mutex::new(jobs)),
        }
    }
}

impl JobRepository for MemoryJobs {
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.records.lock().expect("job mutex poisoned");
        Ok(guard.iter().find(|job| &job.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.records.lock().expect("job mutex poisoned").clone())
    }
}

pub(super) struct UnavailableJobs;

impl JobRepository for UnavailableJobs {
    fn fetch(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Catalog used by service and routing tests:
/// - `job-react`: open, React at Intermediate.
/// - `job-grades`: open, 10th grade minimum of 80%.
/// - `job-closed`: closed, no requirements.
/// - `job-expired`: active but past its deadline.
/// - `job-open`: open, no requirements.
pub(super) fn catalog() -> Vec<JobPosting> {
    let mut grades = job("job-grades", "Analyst");
    grades.eligibility = tenth_grade_rule(80.0);

    let mut closed = job("job-closed", "Archived Role");
    closed.status = JobStatus::Closed;
    closed.required_skills.clear();

    let mut expired = job("job-expired", "Last Season");
    expired.required_skills.clear();
    expired.application_deadline = NaiveDate::from_ymd_opt(2000, 1, 1);

    let mut open = job("job-open", "Generalist");
    open.required_skills.clear();

    vec![react_job(), grades, closed, expired, open]
}

pub(super) fn build_service() -> PlacementMatchService<MemoryStudents, MemoryJobs> {
    let students = Arc::new(MemoryStudents::with(vec![graded_student(70.0, 75.0)]));
    let jobs = Arc::new(MemoryJobs::with(catalog()));
    PlacementMatchService::new(students, jobs, MatchConfig::default())
}

pub(super) fn router_with_service(
    service: PlacementMatchService<MemoryStudents, MemoryJobs>,
) -> axum::Router {
    placement_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
