use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::{GradeRequirement, JobEligibility, StudentProfile};
use super::config::MatchConfig;
use super::percentage;

const DAYS_PER_MONTH: i64 = 30;

/// Independent eligibility rules a job may impose. Ordering drives report and summary order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EligibilityCriterion {
    TenthGrade,
    TwelfthGrade,
    HigherEducation,
    School,
    Campus,
    Module,
    Cgpa,
    FemaleOnly,
    Attendance,
    MonthsAtInstitution,
}

impl EligibilityCriterion {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::TenthGrade,
            Self::TwelfthGrade,
            Self::HigherEducation,
            Self::School,
            Self::Campus,
            Self::Module,
            Self::Cgpa,
            Self::FemaleOnly,
            Self::Attendance,
            Self::MonthsAtInstitution,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::TenthGrade => "10th grade",
            Self::TwelfthGrade => "12th grade",
            Self::HigherEducation => "Degree",
            Self::School => "School",
            Self::Campus => "Campus",
            Self::Module => "Module",
            Self::Cgpa => "CGPA",
            Self::FemaleOnly => "Female-only role",
            Self::Attendance => "Attendance",
            Self::MonthsAtInstitution => "Time at institution",
        }
    }
}

/// Outcome of a single criterion. Unspecified criteria are `required: false, meets: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionDetail {
    pub required: bool,
    pub meets: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
    pub message: String,
}

impl CriterionDetail {
    fn not_required(criterion: EligibilityCriterion) -> Self {
        Self {
            required: false,
            meets: true,
            student_value: None,
            requirement: None,
            message: format!("{}: no requirement", criterion.label()),
        }
    }

    fn evaluated(meets: bool, student_value: String, requirement: String, message: String) -> Self {
        Self {
            required: true,
            meets,
            student_value: Some(student_value),
            requirement: Some(requirement),
            message,
        }
    }

    pub fn is_failed_requirement(&self) -> bool {
        self.required && !self.meets
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityReport {
    pub passed: usize,
    pub total: usize,
    pub percentage: u8,
    pub details: BTreeMap<EligibilityCriterion, CriterionDetail>,
}

impl EligibilityReport {
    pub fn failed(&self) -> impl Iterator<Item = (&EligibilityCriterion, &CriterionDetail)> {
        self.details
            .iter()
            .filter(|(_, detail)| detail.is_failed_requirement())
    }

    pub fn has_failed_requirement(&self) -> bool {
        self.failed().next().is_some()
    }
}

/// Check a student profile against every eligibility criterion of a job.
pub fn evaluate_eligibility(
    profile: &StudentProfile,
    eligibility: &JobEligibility,
    config: &MatchConfig,
    today: NaiveDate,
) -> EligibilityReport {
    let mut details = BTreeMap::new();

    details.insert(
        EligibilityCriterion::TenthGrade,
        grade_rule(
            EligibilityCriterion::TenthGrade,
            &eligibility.tenth_grade,
            profile.academic.tenth_grade.percentage,
        ),
    );
    details.insert(
        EligibilityCriterion::TwelfthGrade,
        grade_rule(
            EligibilityCriterion::TwelfthGrade,
            &eligibility.twelfth_grade,
            profile.academic.twelfth_grade.percentage,
        ),
    );
    details.insert(
        EligibilityCriterion::HigherEducation,
        degree_rule(profile, eligibility),
    );
    details.insert(
        EligibilityCriterion::School,
        whitelist_rule(
            EligibilityCriterion::School,
            &eligibility.schools,
            &profile.current_school,
        ),
    );
    details.insert(
        EligibilityCriterion::Campus,
        whitelist_rule(
            EligibilityCriterion::Campus,
            &eligibility.campuses,
            &profile.campus_id,
        ),
    );
    details.insert(
        EligibilityCriterion::Module,
        module_rule(profile, eligibility, config),
    );
    details.insert(EligibilityCriterion::Cgpa, cgpa_rule(profile, eligibility));
    details.insert(
        EligibilityCriterion::FemaleOnly,
        female_only_rule(profile, eligibility),
    );
    details.insert(
        EligibilityCriterion::Attendance,
        attendance_rule(profile, eligibility),
    );
    details.insert(
        EligibilityCriterion::MonthsAtInstitution,
        tenure_rule(profile, eligibility, today),
    );

    let total = details.values().filter(|detail| detail.required).count();
    let passed = details
        .values()
        .filter(|detail| detail.required && detail.meets)
        .count();

    EligibilityReport {
        passed,
        total,
        percentage: percentage(passed as f64, total as f64),
        details,
    }
}

/// CGPA estimate from school grades when no explicit CGPA is recorded. A heuristic, not a
/// university-issued figure.
pub fn estimated_cgpa(profile: &StudentProfile) -> f64 {
    profile.academic.cgpa.unwrap_or_else(|| {
        (profile.academic.tenth_grade.percentage + profile.academic.twelfth_grade.percentage)
            / 2.0
            / 10.0
    })
}

/// Whole 30-day months between the join date and `today`. No join date, or one in the
/// future, yields zero.
pub fn months_at_institution(profile: &StudentProfile, today: NaiveDate) -> u32 {
    profile
        .join_date()
        .map(|joined| (today - joined).num_days())
        .filter(|days| *days > 0)
        .map(|days| (days / DAYS_PER_MONTH) as u32)
        .unwrap_or(0)
}

fn grade_rule(
    criterion: EligibilityCriterion,
    requirement: &GradeRequirement,
    student_percentage: f64,
) -> CriterionDetail {
    if !requirement.required {
        return CriterionDetail::not_required(criterion);
    }

    let meets = student_percentage >= requirement.min_percentage;
    CriterionDetail::evaluated(
        meets,
        format!("{student_percentage}%"),
        format!("{}%", requirement.min_percentage),
        format!(
            "{}: {}% (required {}%)",
            criterion.label(),
            student_percentage,
            requirement.min_percentage
        ),
    )
}

fn degree_rule(profile: &StudentProfile, eligibility: &JobEligibility) -> CriterionDetail {
    let criterion = EligibilityCriterion::HigherEducation;
    let requirement = &eligibility.higher_education;
    if !requirement.required {
        return CriterionDetail::not_required(criterion);
    }

    let student_degrees: Vec<&str> = profile
        .academic
        .higher_education
        .iter()
        .map(|entry| entry.degree.trim())
        .filter(|degree| !degree.is_empty())
        .collect();

    let meets = if requirement.degrees.is_empty() {
        !student_degrees.is_empty()
    } else {
        student_degrees.iter().any(|degree| {
            requirement
                .degrees
                .iter()
                .any(|accepted| accepted.trim().eq_ignore_ascii_case(degree))
        })
    };

    let student_value = if student_degrees.is_empty() {
        "none".to_string()
    } else {
        student_degrees.join(", ")
    };
    let accepted = if requirement.degrees.is_empty() {
        "any degree".to_string()
    } else {
        requirement.degrees.join(", ")
    };

    CriterionDetail::evaluated(
        meets,
        student_value.clone(),
        accepted.clone(),
        format!(
            "{}: {} (accepted: {})",
            criterion.label(),
            student_value,
            accepted
        ),
    )
}

fn whitelist_rule(
    criterion: EligibilityCriterion,
    allowed: &[String],
    student_value: &str,
) -> CriterionDetail {
    if allowed.is_empty() {
        return CriterionDetail::not_required(criterion);
    }

    let student_value = student_value.trim();
    let meets = !student_value.is_empty()
        && allowed
            .iter()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(student_value));
    let shown = if student_value.is_empty() {
        "not set"
    } else {
        student_value
    };

    CriterionDetail::evaluated(
        meets,
        shown.to_string(),
        allowed.join(", "),
        format!(
            "{}: {} (eligible: {})",
            criterion.label(),
            shown,
            allowed.join(", ")
        ),
    )
}

fn module_rule(
    profile: &StudentProfile,
    eligibility: &JobEligibility,
    config: &MatchConfig,
) -> CriterionDetail {
    let criterion = EligibilityCriterion::Module;
    let required_module = match eligibility.min_module.as_deref().map(str::trim) {
        Some(module) if !module.is_empty() => module,
        _ => return CriterionDetail::not_required(criterion),
    };

    let meets = config.module_rank(&profile.current_module) >= config.module_rank(required_module);
    let shown = if profile.current_module.trim().is_empty() {
        "not set"
    } else {
        profile.current_module.trim()
    };

    CriterionDetail::evaluated(
        meets,
        shown.to_string(),
        required_module.to_string(),
        format!(
            "{}: {} (minimum {})",
            criterion.label(),
            shown,
            required_module
        ),
    )
}

fn cgpa_rule(profile: &StudentProfile, eligibility: &JobEligibility) -> CriterionDetail {
    let criterion = EligibilityCriterion::Cgpa;
    let minimum = match eligibility.min_cgpa {
        Some(minimum) if minimum > 0.0 => minimum,
        _ => return CriterionDetail::not_required(criterion),
    };

    let cgpa = estimated_cgpa(profile);
    CriterionDetail::evaluated(
        cgpa >= minimum,
        format!("{cgpa:.2}"),
        format!("{minimum:.2}"),
        format!(
            "{}: {:.2} (required {:.2})",
            criterion.label(),
            cgpa,
            minimum
        ),
    )
}

fn female_only_rule(profile: &StudentProfile, eligibility: &JobEligibility) -> CriterionDetail {
    let criterion = EligibilityCriterion::FemaleOnly;
    if !eligibility.female_only {
        return CriterionDetail::not_required(criterion);
    }

    let gender = profile.gender.trim();
    let meets = gender.eq_ignore_ascii_case("female");
    let shown = if gender.is_empty() { "not set" } else { gender };

    CriterionDetail::evaluated(
        meets,
        shown.to_string(),
        "female".to_string(),
        format!("{}: open to female students only", criterion.label()),
    )
}

fn attendance_rule(profile: &StudentProfile, eligibility: &JobEligibility) -> CriterionDetail {
    let criterion = EligibilityCriterion::Attendance;
    let minimum = match eligibility.min_attendance {
        Some(minimum) if minimum > 0.0 => minimum,
        _ => return CriterionDetail::not_required(criterion),
    };

    let attendance = profile.attendance_percentage;
    CriterionDetail::evaluated(
        attendance >= minimum,
        format!("{attendance}%"),
        format!("{minimum}%"),
        format!(
            "{}: {}% (required {}%)",
            criterion.label(),
            attendance,
            minimum
        ),
    )
}

fn tenure_rule(
    profile: &StudentProfile,
    eligibility: &JobEligibility,
    today: NaiveDate,
) -> CriterionDetail {
    let criterion = EligibilityCriterion::MonthsAtInstitution;
    let minimum = match eligibility.min_months_at_institution {
        Some(minimum) if minimum > 0 => minimum,
        _ => return CriterionDetail::not_required(criterion),
    };

    let months = months_at_institution(profile, today);
    CriterionDetail::evaluated(
        months >= minimum,
        format!("{months} months"),
        format!("{minimum} months"),
        format!(
            "{}: {} months (required {} months)",
            criterion.label(),
            months,
            minimum
        ),
    )
}
