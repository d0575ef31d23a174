use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for student records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentId(pub String);

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a skill in the shared skill catalog.
///
/// Documents carry either a bare identifier or a populated `{ _id, name }` object,
/// both forms deserialize into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SkillRefRepr")]
pub struct SkillRef {
    pub id: String,
    pub name: String,
}

impl SkillRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SkillRefRepr {
    Id(String),
    Populated {
        #[serde(alias = "_id", default)]
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl From<SkillRefRepr> for SkillRef {
    fn from(repr: SkillRefRepr) -> Self {
        match repr {
            SkillRefRepr::Id(id) => Self {
                id,
                name: String::new(),
            },
            SkillRefRepr::Populated { id, name } => Self { id, name },
        }
    }
}

/// Student profile as loaded from the profile store. Missing fields resolve to zero values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentProfile {
    #[serde(alias = "_id")]
    pub id: StudentId,
    pub technical_skills: Vec<TechnicalSkill>,
    pub soft_skills: BTreeMap<String, u8>,
    pub legacy_skills: Vec<LegacySkill>,
    pub academic: AcademicRecord,
    pub current_school: String,
    pub current_module: String,
    pub campus_id: String,
    pub gender: String,
    pub attendance_percentage: f64,
    #[serde(deserialize_with = "deserialize_optional_day")]
    pub date_of_joining: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_day")]
    pub joining_date: Option<NaiveDate>,
}

impl StudentProfile {
    /// `dateOfJoining` wins over the older `joiningDate` field.
    pub fn join_date(&self) -> Option<NaiveDate> {
        self.date_of_joining.or(self.joining_date)
    }
}

/// Self-rated technical skill, `self_rating` on the 0 (None) to 4 (Expert) scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalSkill {
    pub skill_id: String,
    pub skill_name: String,
    pub self_rating: u8,
}

/// Skill attached through the older approval workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacySkill {
    #[serde(alias = "skill")]
    pub skill_ref: SkillRef,
    pub status: LegacySkillStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegacySkillStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AcademicRecord {
    pub tenth_grade: GradeRecord,
    pub twelfth_grade: GradeRecord,
    pub higher_education: Vec<HigherEducation>,
    pub cgpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeRecord {
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HigherEducation {
    pub degree: String,
}

/// Publication state of a job posting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Draft,
    #[default]
    Active,
    Closed,
    Filled,
}

impl JobStatus {
    pub const fn label(self) -> &'static str {
        match self {
            JobStatus::Draft => "draft",
            JobStatus::Active => "active",
            JobStatus::Closed => "closed",
            JobStatus::Filled => "filled",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Job posting as loaded from the job store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobPosting {
    #[serde(alias = "_id")]
    pub id: JobId,
    pub title: String,
    pub company: String,
    pub status: JobStatus,
    #[serde(deserialize_with = "deserialize_optional_day")]
    pub application_deadline: Option<NaiveDate>,
    pub eligibility: JobEligibility,
    pub required_skills: Vec<JobRequiredSkill>,
    pub custom_requirements: Vec<CustomRequirement>,
}

impl JobPosting {
    /// Active and, when a deadline is set, not yet past it.
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        self.status == JobStatus::Active
            && self
                .application_deadline
                .map(|deadline| today <= deadline)
                .unwrap_or(true)
    }
}

/// Eligibility rules of a job. Each criterion is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobEligibility {
    pub tenth_grade: GradeRequirement,
    pub twelfth_grade: GradeRequirement,
    pub higher_education: DegreeRequirement,
    pub schools: Vec<String>,
    pub campuses: Vec<String>,
    pub min_module: Option<String>,
    pub min_cgpa: Option<f64>,
    pub female_only: bool,
    pub min_attendance: Option<f64>,
    pub min_months_at_institution: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradeRequirement {
    pub required: bool,
    pub min_percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DegreeRequirement {
    pub required: bool,
    pub degrees: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobRequiredSkill {
    #[serde(alias = "skill")]
    pub skill_ref: SkillRef,
    pub required: bool,
    pub proficiency_level: u8,
}

/// Yes/no requirement answered by the student when applying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomRequirement {
    pub text: String,
    pub is_mandatory: bool,
}

pub(crate) fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD or RFC 3339 ({err})"))
}

fn deserialize_optional_day<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    match opt {
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => parse_day(&value).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
