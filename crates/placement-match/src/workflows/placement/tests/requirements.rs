use super::common::*;
use crate::workflows::placement::matching::match_requirements;

#[test]
fn no_requirements_is_a_full_pass() {
    let report = match_requirements(&[], &[true, false]);

    assert_eq!(report.percentage, 100);
    assert_eq!(report.total, 0);
    assert!(report.details.is_empty());
}

#[test]
fn optional_requirement_answered_no_still_counts() {
    let requirements = vec![requirement("Comfortable with night shifts", false)];

    let report = match_requirements(&requirements, &[false]);

    assert_eq!(report.percentage, 100);
    assert_eq!(report.met, 1);
    assert!(!report.details[0].meets);
    assert_eq!(report.unconfirmed_mandatory().count(), 0);
}

#[test]
fn mandatory_requirement_answered_no_is_unmet() {
    let requirements = vec![
        requirement("Willing to relocate to Pune", true),
        requirement("Own a laptop", true),
    ];

    let report = match_requirements(&requirements, &[true, false]);

    assert_eq!(report.met, 1);
    assert_eq!(report.total, 2);
    assert_eq!(report.percentage, 50);
    let pending: Vec<_> = report
        .unconfirmed_mandatory()
        .map(|detail| detail.text.as_str())
        .collect();
    assert_eq!(pending, vec!["Own a laptop"]);
}

#[test]
fn missing_answers_count_as_no_and_extra_answers_are_ignored() {
    let requirements = vec![
        requirement("Willing to relocate", true),
        requirement("Available immediately", true),
        requirement("Has a passport", false),
    ];

    let short = match_requirements(&requirements, &[true]);
    let long = match_requirements(&requirements, &[true, true, true, false, false]);

    assert_eq!(short.met, 2);
    assert_eq!(short.percentage, 67);
    assert!(!short.details[1].meets);
    assert_eq!(long.met, 3);
    assert_eq!(long.percentage, 100);
    assert_eq!(long.details.len(), 3);
}
