use std::sync::Arc;

use super::common::*;
use crate::workflows::placement::domain::{JobId, JobStatus, StudentId};
use crate::workflows::placement::repository::RepositoryError;
use crate::workflows::placement::{MatchConfig, MatchServiceError, PlacementMatchService};

fn student_id() -> StudentId {
    StudentId("stu-1".to_string())
}

fn job_id(id: &str) -> JobId {
    JobId(id.to_string())
}

#[test]
fn match_for_job_annotates_result_with_job_details() {
    let service = build_service();

    let view = service
        .match_for_job_on(&student_id(), &job_id("job-react"), &[], today())
        .expect("match computed");

    assert_eq!(view.job_id, job_id("job-react"));
    assert_eq!(view.title, "Frontend Intern");
    assert_eq!(view.company, "Acme Labs");
    assert_eq!(view.result.overall_percentage, 100);
    assert!(view.result.can_apply);
}

#[test]
fn match_for_job_reports_missing_student_and_job() {
    let service = build_service();

    let ghost = StudentId("ghost".to_string());

    match service.match_for_job_on(&ghost, &job_id("job-react"), &[], today()) {
        Err(MatchServiceError::StudentNotFound(id)) => assert_eq!(id.0, "ghost"),
        other => panic!("expected missing student, got {other:?}"),
    }
    match service.match_for_job_on(&student_id(), &job_id("job-ghost"), &[], today()) {
        Err(MatchServiceError::JobNotFound(id)) => assert_eq!(id.0, "job-ghost"),
        other => panic!("expected missing job, got {other:?}"),
    }
}

#[test]
fn recommended_jobs_rank_open_jobs_best_first() {
    let service = build_service();

    let views = service
        .recommended_jobs_on(&student_id(), 10, today())
        .expect("recommendations");

    let ids: Vec<&str> = views.iter().map(|view| view.job_id.0.as_str()).collect();
    assert_eq!(ids, vec!["job-open", "job-react", "job-grades"]);
    let scores: Vec<u8> = views
        .iter()
        .map(|view| view.result.overall_percentage)
        .collect();
    assert_eq!(scores, vec![100, 100, 59]);
}

#[test]
fn recommended_jobs_respect_limit() {
    let service = build_service();

    let views = service
        .recommended_jobs_on(&student_id(), 1, today())
        .expect("recommendations");
    let none = service
        .recommended_jobs_on(&student_id(), 0, today())
        .expect("recommendations");

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].job_id, job_id("job-open"));
    assert!(none.is_empty());
}

#[test]
fn check_application_passes_for_strong_match() {
    let service = build_service();

    let gate = service
        .check_application_on(&student_id(), &job_id("job-react"), &[], today())
        .expect("application allowed");

    assert!(gate.can_apply);
    assert_eq!(gate.student_id, student_id());
    assert_eq!(gate.job_id, job_id("job-react"));
    assert_eq!(gate.result.overall_percentage, 100);
}

#[test]
fn check_application_rejects_closed_and_expired_jobs() {
    let service = build_service();

    match service.check_application_on(&student_id(), &job_id("job-closed"), &[], today()) {
        Err(MatchServiceError::JobClosed { job_id, status }) => {
            assert_eq!(job_id.0, "job-closed");
            assert_eq!(status, JobStatus::Closed);
        }
        other => panic!("expected closed job, got {other:?}"),
    }
    match service.check_application_on(&student_id(), &job_id("job-expired"), &[], today()) {
        Err(MatchServiceError::JobClosed { status, .. }) => {
            assert_eq!(status, JobStatus::Active);
        }
        other => panic!("expected expired job, got {other:?}"),
    }
}

#[test]
fn check_application_rejects_capped_match() {
    let service = build_service();

    match service.check_application_on(&student_id(), &job_id("job-grades"), &[], today()) {
        Err(MatchServiceError::NotEligible {
            overall_percentage,
            summary,
        }) => {
            assert_eq!(overall_percentage, 59);
            assert_eq!(summary[0], "Some requirements not met");
        }
        other => panic!("expected ineligible match, got {other:?}"),
    }
}

#[test]
fn service_uses_supplied_configuration() {
    let students = Arc::new(MemoryStudents::with(vec![graded_student(70.0, 75.0)]));
    let jobs = Arc::new(MemoryJobs::with(catalog()));
    let service = PlacementMatchService::new(
        students,
        jobs,
        MatchConfig {
            apply_threshold: 40,
            ..MatchConfig::default()
        },
    );

    assert_eq!(service.scorer().config().apply_threshold, 40);
    match service.check_application_on(&student_id(), &job_id("job-grades"), &[], today()) {
        Err(MatchServiceError::NotEligible {
            overall_percentage, ..
        }) => assert_eq!(overall_percentage, 39),
        other => panic!("expected ineligible match, got {other:?}"),
    }
}

#[test]
fn repository_failures_propagate() {
    let students = Arc::new(MemoryStudents::with(vec![react_student()]));
    let service =
        PlacementMatchService::new(students, Arc::new(UnavailableJobs), MatchConfig::default());

    match service.recommended_jobs_on(&student_id(), 5, today()) {
        Err(MatchServiceError::Repository(RepositoryError::Unavailable(message))) => {
            assert_eq!(message, "database offline");
        }
        other => panic!("expected repository failure, got {other:?}"),
    }
}

#[test]
fn score_uses_supplied_documents_and_date() {
    let service = build_service();
    let mut job = react_job();
    job.application_deadline = chrono::NaiveDate::from_ymd_opt(2000, 1, 1);

    let result = service.score(&react_student(), &job, &[], Some(today()));

    assert_eq!(result.overall_percentage, 100);
}
