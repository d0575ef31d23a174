use serde::{Deserialize, Serialize};

pub const DEFAULT_SKILL_WEIGHT: f64 = 0.4;
pub const DEFAULT_ELIGIBILITY_WEIGHT: f64 = 0.4;
pub const DEFAULT_REQUIREMENTS_WEIGHT: f64 = 0.2;
pub const DEFAULT_APPLY_THRESHOLD: u8 = 60;
pub const DEFAULT_ELIGIBILITY_CAP: u8 = 59;

/// Curriculum stages from earliest to latest.
pub const DEFAULT_MODULE_ORDER: [&str; 6] = [
    "Foundation",
    "Basics of Programming",
    "DSA",
    "Backend",
    "Full Stack",
    "Interview Prep",
];

/// Tunable weights and gates applied by the match scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub skill_weight: f64,
    pub eligibility_weight: f64,
    pub requirements_weight: f64,
    pub apply_threshold: u8,
    pub eligibility_cap_when_mandatory_failed: u8,
    pub module_order: Vec<String>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            skill_weight: DEFAULT_SKILL_WEIGHT,
            eligibility_weight: DEFAULT_ELIGIBILITY_WEIGHT,
            requirements_weight: DEFAULT_REQUIREMENTS_WEIGHT,
            apply_threshold: DEFAULT_APPLY_THRESHOLD,
            eligibility_cap_when_mandatory_failed: DEFAULT_ELIGIBILITY_CAP,
            module_order: DEFAULT_MODULE_ORDER
                .iter()
                .map(|module| module.to_string())
                .collect(),
        }
    }
}

impl MatchConfig {
    /// Replace unusable weights with their defaults and keep the apply threshold in `1..=100`.
    pub fn sanitized(mut self) -> Self {
        self.skill_weight = sanitize_weight(self.skill_weight, DEFAULT_SKILL_WEIGHT);
        self.eligibility_weight =
            sanitize_weight(self.eligibility_weight, DEFAULT_ELIGIBILITY_WEIGHT);
        self.requirements_weight =
            sanitize_weight(self.requirements_weight, DEFAULT_REQUIREMENTS_WEIGHT);
        self.apply_threshold = self.apply_threshold.clamp(1, 100);
        self
    }

    /// Cap applied when a required eligibility criterion fails. Always below the apply threshold.
    pub fn effective_cap(&self) -> u8 {
        self.eligibility_cap_when_mandatory_failed
            .min(self.apply_threshold.saturating_sub(1))
    }

    /// Position of `module` in the curriculum, `-1` when unknown.
    pub fn module_rank(&self, module: &str) -> i32 {
        let module = module.trim();
        self.module_order
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(module))
            .map(|index| index as i32)
            .unwrap_or(-1)
    }
}

fn sanitize_weight(weight: f64, fallback: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        fallback
    }
}
