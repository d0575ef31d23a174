use super::config::MatchConfig;
use super::eligibility::EligibilityReport;
use super::requirements::RequirementsReport;
use super::skills::SkillMatchReport;

pub const EXCELLENT_MATCH_THRESHOLD: u8 = 80;
const MAX_LISTED_SKILLS: usize = 3;

/// Headline band for an overall percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchHeadline {
    Excellent,
    Good,
    RequirementsNotMet,
}

impl MatchHeadline {
    /// The excellent band never starts below the apply threshold.
    pub fn for_score(overall: u8, config: &MatchConfig) -> Self {
        if overall >= EXCELLENT_MATCH_THRESHOLD.max(config.apply_threshold) {
            Self::Excellent
        } else if overall >= config.apply_threshold {
            Self::Good
        } else {
            Self::RequirementsNotMet
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent match!",
            Self::Good => "Good match",
            Self::RequirementsNotMet => "Some requirements not met",
        }
    }
}

pub(crate) fn build_summary(
    overall: u8,
    config: &MatchConfig,
    skills: &SkillMatchReport,
    eligibility: &EligibilityReport,
    requirements: &RequirementsReport,
) -> Vec<String> {
    let mut lines = vec![MatchHeadline::for_score(overall, config).label().to_string()];
    lines.push(skills_line(skills));
    lines.push(eligibility_line(eligibility));
    if let Some(line) = requirements_line(requirements) {
        lines.push(line);
    }
    lines
}

fn skills_line(skills: &SkillMatchReport) -> String {
    if skills.required == 0 {
        return "No specific skills required".to_string();
    }

    let unmet: Vec<String> = skills
        .unmet()
        .map(|detail| {
            let name = if detail.skill_name.is_empty() {
                detail.skill_id.as_str()
            } else {
                detail.skill_name.as_str()
            };
            format!("{} (needs {})", name, detail.required_level_label)
        })
        .collect();

    if unmet.is_empty() {
        return format!("All {} required skills matched", skills.required);
    }

    let listed = unmet
        .iter()
        .take(MAX_LISTED_SKILLS)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if unmet.len() > MAX_LISTED_SKILLS {
        format!(
            "Missing skills: {} and {} more",
            listed,
            unmet.len() - MAX_LISTED_SKILLS
        )
    } else {
        format!("Missing skills: {listed}")
    }
}

fn eligibility_line(eligibility: &EligibilityReport) -> String {
    let gaps: Vec<&str> = eligibility
        .failed()
        .map(|(_, detail)| detail.message.as_str())
        .collect();

    if !gaps.is_empty() {
        format!("Eligibility gaps: {}", gaps.join("; "))
    } else if eligibility.total == 0 {
        "No eligibility restrictions".to_string()
    } else {
        "Meets all eligibility criteria".to_string()
    }
}

fn requirements_line(requirements: &RequirementsReport) -> Option<String> {
    let pending: Vec<&str> = requirements
        .unconfirmed_mandatory()
        .map(|detail| detail.text.as_str())
        .collect();

    if pending.is_empty() {
        None
    } else {
        Some(format!(
            "Mandatory requirements not confirmed: {}",
            pending.join("; ")
        ))
    }
}
