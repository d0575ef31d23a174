use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{JobId, JobPosting, StudentId, StudentProfile};
use super::repository::{JobRepository, RepositoryError, StudentRepository};
use super::service::{MatchServiceError, PlacementMatchService, DEFAULT_RECOMMENDATION_LIMIT};

/// Inline scoring request carrying both documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub student: StudentProfile,
    pub job: JobPosting,
    #[serde(default)]
    pub requirement_responses: Vec<bool>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementResponses {
    pub requirement_responses: Vec<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<usize>,
}

/// Router builder exposing HTTP endpoints for match scoring and apply checks.
pub fn placement_router<S, J>(service: Arc<PlacementMatchService<S, J>>) -> Router
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    Router::new()
        .route("/api/v1/match", post(score_handler::<S, J>))
        .route(
            "/api/v1/students/:student_id/jobs/:job_id/match",
            get(job_match_handler::<S, J>),
        )
        .route(
            "/api/v1/students/:student_id/recommended-jobs",
            get(recommended_jobs_handler::<S, J>),
        )
        .route(
            "/api/v1/students/:student_id/jobs/:job_id/apply-check",
            post(apply_check_handler::<S, J>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<S, J>(
    State(service): State<Arc<PlacementMatchService<S, J>>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    let result = service.score(
        &request.student,
        &request.job,
        &request.requirement_responses,
        request.today,
    );
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn job_match_handler<S, J>(
    State(service): State<Arc<PlacementMatchService<S, J>>>,
    Path((student_id, job_id)): Path<(String, String)>,
) -> Response
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    match service.match_for_job(&StudentId(student_id), &JobId(job_id), &[]) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommended_jobs_handler<S, J>(
    State(service): State<Arc<PlacementMatchService<S, J>>>,
    Path(student_id): Path<String>,
    Query(query): Query<RecommendationQuery>,
) -> Response
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_RECOMMENDATION_LIMIT);
    match service.recommended_jobs(&StudentId(student_id), limit) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn apply_check_handler<S, J>(
    State(service): State<Arc<PlacementMatchService<S, J>>>,
    Path((student_id, job_id)): Path<(String, String)>,
    axum::Json(body): axum::Json<RequirementResponses>,
) -> Response
where
    S: StudentRepository + 'static,
    J: JobRepository + 'static,
{
    match service.check_application(
        &StudentId(student_id),
        &JobId(job_id),
        &body.requirement_responses,
    ) {
        Ok(gate) => (StatusCode::OK, axum::Json(gate)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    match error {
        MatchServiceError::StudentNotFound(_)
        | MatchServiceError::JobNotFound(_)
        | MatchServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        MatchServiceError::JobClosed { .. } => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        MatchServiceError::NotEligible {
            overall_percentage,
            ref summary,
        } => {
            let payload = json!({
                "error": error.to_string(),
                "canApply": false,
                "overallPercentage": overall_percentage,
                "summary": summary,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        MatchServiceError::Repository(RepositoryError::Unavailable(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
