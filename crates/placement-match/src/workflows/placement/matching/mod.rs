mod config;
mod eligibility;
mod requirements;
mod skills;
mod summary;

pub use config::{MatchConfig, DEFAULT_MODULE_ORDER};
pub use eligibility::{
    estimated_cgpa, evaluate_eligibility, months_at_institution, CriterionDetail,
    EligibilityCriterion, EligibilityReport,
};
pub use requirements::{match_requirements, RequirementDetail, RequirementsReport};
pub use skills::{
    level_label, match_skills, resolve_student_skill_level, SkillMatchDetail, SkillMatchReport,
    StudentSkillIndex, LEVEL_LABELS,
};
pub use summary::{MatchHeadline, EXCELLENT_MATCH_THRESHOLD};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{JobPosting, StudentProfile};

/// Stateless scorer combining skill, eligibility, and custom requirement checks.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: MatchConfig,
}

impl MatchScorer {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Score a student against a job as of today, with no requirement answers recorded.
    pub fn calculate_match(&self, profile: &StudentProfile, job: &JobPosting) -> MatchResult {
        self.calculate_match_on(profile, job, &[], Local::now().date_naive())
    }

    pub fn calculate_match_on(
        &self,
        profile: &StudentProfile,
        job: &JobPosting,
        responses: &[bool],
        today: NaiveDate,
    ) -> MatchResult {
        let skills = match_skills(profile, &job.required_skills);
        let eligibility = evaluate_eligibility(profile, &job.eligibility, &self.config, today);
        let requirements = match_requirements(&job.custom_requirements, responses);

        let weighted = skills.percentage as f64 * self.config.skill_weight
            + eligibility.percentage as f64 * self.config.eligibility_weight
            + requirements.percentage as f64 * self.config.requirements_weight;
        let mut overall = weighted.round().clamp(0.0, 100.0) as u8;

        let gated = eligibility.has_failed_requirement();
        if gated {
            overall = overall.min(self.config.effective_cap());
        }
        let can_apply = !gated && overall >= self.config.apply_threshold;

        debug!(
            student = %profile.id,
            job = %job.id,
            skills = skills.percentage,
            eligibility = eligibility.percentage,
            requirements = requirements.percentage,
            overall,
            gated,
            can_apply,
            "scored job match"
        );

        let summary =
            summary::build_summary(overall, &self.config, &skills, &eligibility, &requirements);

        MatchResult {
            overall_percentage: overall,
            can_apply,
            breakdown: MatchBreakdown {
                skills,
                eligibility,
                requirements,
            },
            summary,
        }
    }
}

/// Per-component reports behind an overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub skills: SkillMatchReport,
    pub eligibility: EligibilityReport,
    pub requirements: RequirementsReport,
}

/// Scoring output for one student and job pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub overall_percentage: u8,
    pub can_apply: bool,
    pub breakdown: MatchBreakdown,
    pub summary: Vec<String>,
}

/// `part / whole` as a rounded percentage; an empty set counts as a full pass.
pub(crate) fn percentage(part: f64, whole: f64) -> u8 {
    if whole <= 0.0 {
        return 100;
    }
    ((part / whole) * 100.0).round().clamp(0.0, 100.0) as u8
}
