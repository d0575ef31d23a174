use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::super::domain::{JobRequiredSkill, LegacySkillStatus, SkillRef, StudentProfile};
use super::percentage;

/// Labels for proficiency levels 0 through 4.
pub const LEVEL_LABELS: [&str; 5] = ["None", "Beginner", "Intermediate", "Advanced", "Expert"];

const LEGACY_SKILL_RATING: u8 = 1;
const REQUIRED_SKILL_WEIGHT: u32 = 2;
const OPTIONAL_SKILL_WEIGHT: u32 = 1;

pub fn level_label(level: u8) -> &'static str {
    LEVEL_LABELS
        .get(level as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// Lookup of a student's skill ratings by identifier and by lower-cased name.
///
/// Sources merge in priority order: self-rated technical skills, then soft skills,
/// then approved legacy skills. Within technical skills the last entry wins.
#[derive(Debug, Default, Clone)]
pub struct StudentSkillIndex {
    by_id: HashMap<String, u8>,
    by_name: HashMap<String, u8>,
}

impl StudentSkillIndex {
    pub fn from_profile(profile: &StudentProfile) -> Self {
        let mut index = Self::default();

        for skill in &profile.technical_skills {
            if !skill.skill_id.is_empty() {
                index.by_id.insert(skill.skill_id.clone(), skill.self_rating);
            }
            let name = normalize_name(&skill.skill_name);
            if !name.is_empty() {
                index.by_name.insert(name, skill.self_rating);
            }
        }

        for (key, rating) in &profile.soft_skills {
            let name = normalize_name(key);
            if !name.is_empty() {
                index.by_name.entry(name).or_insert(*rating);
            }
        }

        for legacy in profile
            .legacy_skills
            .iter()
            .filter(|legacy| legacy.status == LegacySkillStatus::Approved)
        {
            if !legacy.skill_ref.id.is_empty() {
                index
                    .by_id
                    .entry(legacy.skill_ref.id.clone())
                    .or_insert(LEGACY_SKILL_RATING);
            }
            let name = normalize_name(&legacy.skill_ref.name);
            if !name.is_empty() {
                index.by_name.entry(name).or_insert(LEGACY_SKILL_RATING);
            }
        }

        index
    }

    /// Identifier lookup first; a missing or zero rating falls back to the name lookup.
    pub fn level_for(&self, skill: &SkillRef) -> u8 {
        let by_id = self.by_id.get(&skill.id).copied().unwrap_or(0);
        if by_id > 0 {
            return by_id;
        }
        self.by_name
            .get(&normalize_name(&skill.name))
            .copied()
            .unwrap_or(0)
    }
}

/// Resolve a single skill level for `profile`. Builds a fresh index; prefer
/// [`StudentSkillIndex`] when resolving many skills.
pub fn resolve_student_skill_level(profile: &StudentProfile, skill: &SkillRef) -> u8 {
    StudentSkillIndex::from_profile(profile).level_for(skill)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchDetail {
    pub skill_id: String,
    pub skill_name: String,
    pub required: bool,
    pub weight: u32,
    pub required_level: u8,
    pub required_level_label: String,
    pub student_level: u8,
    pub student_level_label: String,
    pub meets: bool,
    pub gap: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatchReport {
    pub matched: usize,
    pub required: usize,
    pub percentage: u8,
    pub details: Vec<SkillMatchDetail>,
}

impl SkillMatchReport {
    pub fn unmet(&self) -> impl Iterator<Item = &SkillMatchDetail> {
        self.details.iter().filter(|detail| !detail.meets)
    }
}

/// Compare the student's ratings against each required skill of a job.
pub fn match_skills(
    profile: &StudentProfile,
    required_skills: &[JobRequiredSkill],
) -> SkillMatchReport {
    let index = StudentSkillIndex::from_profile(profile);

    let mut matched = 0;
    let mut met_weight = 0u32;
    let mut total_weight = 0u32;
    let mut details = Vec::with_capacity(required_skills.len());

    for requirement in required_skills {
        let student_level = index.level_for(&requirement.skill_ref);
        let required_level = requirement.proficiency_level;
        let weight = if requirement.required {
            REQUIRED_SKILL_WEIGHT
        } else {
            OPTIONAL_SKILL_WEIGHT
        };
        let meets = student_level >= required_level;

        total_weight += weight;
        if meets {
            matched += 1;
            met_weight += weight;
        }

        details.push(SkillMatchDetail {
            skill_id: requirement.skill_ref.id.clone(),
            skill_name: requirement.skill_ref.name.clone(),
            required: requirement.required,
            weight,
            required_level,
            required_level_label: level_label(required_level).to_string(),
            student_level,
            student_level_label: level_label(student_level).to_string(),
            meets,
            gap: if meets {
                0
            } else {
                required_level.saturating_sub(student_level)
            },
        });
    }

    SkillMatchReport {
        matched,
        required: required_skills.len(),
        percentage: percentage(met_weight as f64, total_weight as f64),
        details,
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
