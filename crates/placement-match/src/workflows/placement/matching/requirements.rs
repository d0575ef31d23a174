use serde::{Deserialize, Serialize};

use super::super::domain::CustomRequirement;
use super::percentage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDetail {
    pub text: String,
    pub is_mandatory: bool,
    pub meets: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsReport {
    pub met: usize,
    pub total: usize,
    pub percentage: u8,
    pub details: Vec<RequirementDetail>,
}

impl RequirementsReport {
    pub fn unconfirmed_mandatory(&self) -> impl Iterator<Item = &RequirementDetail> {
        self.details
            .iter()
            .filter(|detail| detail.is_mandatory && !detail.meets)
    }
}

/// Match custom yes/no requirements against the student's answers.
///
/// Answers are positional: `responses[i]` answers `requirements[i]`. A missing answer is a
/// "no". Optional requirements count as met whatever the answer.
pub fn match_requirements(
    requirements: &[CustomRequirement],
    responses: &[bool],
) -> RequirementsReport {
    let details: Vec<RequirementDetail> = requirements
        .iter()
        .enumerate()
        .map(|(index, requirement)| RequirementDetail {
            text: requirement.text.clone(),
            is_mandatory: requirement.is_mandatory,
            meets: responses.get(index).copied().unwrap_or(false),
        })
        .collect();

    let met = details
        .iter()
        .filter(|detail| detail.meets || !detail.is_mandatory)
        .count();

    RequirementsReport {
        met,
        total: details.len(),
        percentage: percentage(met as f64, details.len() as f64),
        details,
    }
}
