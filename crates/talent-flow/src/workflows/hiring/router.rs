use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationForm, ApplicationStatus, CandidateId, EmailDraft, JobId, QuestionId};
use super::jobs::{JobField, QuestionField};
use super::pipeline::ApprovalOutcome;
use super::service::HiringService;
use crate::error::AppError;

/// Header carrying the shared recruiter password.
pub const RECRUITER_HEADER: &str = "x-recruiter-password";

/// State shared by every hiring handler.
#[derive(Clone)]
pub struct HiringApi {
    pub service: HiringService,
    /// Base URL the apply links point at.
    pub public_url: String,
    pub recruiter_password: String,
}

/// Public careers endpoints plus the password-gated recruiter board.
pub fn hiring_router(api: HiringApi) -> Router {
    let recruiter = Router::new()
        .route("/jobs", get(list_jobs_handler).post(add_job_handler))
        .route("/jobs/:job_id", patch(update_job_handler))
        .route("/jobs/:job_id/questions", post(add_question_handler))
        .route(
            "/jobs/:job_id/questions/:question_id",
            patch(update_question_handler).delete(delete_question_handler),
        )
        .route("/jobs/:job_id/link", get(apply_link_handler))
        .route("/jobs/:job_id/pipeline", get(pipeline_handler))
        .route("/stats", get(stats_handler))
        .route("/pending", get(pending_list_handler))
        .route("/candidates/:candidate_id/status", post(status_change_handler))
        .route(
            "/candidates/:candidate_id/pending",
            get(pending_handler).delete(cancel_handler),
        )
        .route("/candidates/:candidate_id/pending/draft", put(revise_draft_handler))
        .route("/candidates/:candidate_id/pending/approve", post(approve_handler))
        .route("/candidates/:candidate_id/summary", post(refresh_summary_handler))
        .route_layer(middleware::from_fn_with_state(api.clone(), require_recruiter));

    Router::new()
        .route("/api/v1/jobs", get(open_jobs_handler))
        .route("/api/v1/apply", get(apply_lookup_handler))
        .route("/api/v1/jobs/:job_id/applications", post(submit_handler))
        .nest("/api/v1/recruiter", recruiter)
        .with_state(api)
}

async fn require_recruiter(State(api): State<HiringApi>, request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(RECRUITER_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == api.recruiter_password);

    if !authorized {
        return error_response(StatusCode::UNAUTHORIZED, "recruiter password required");
    }
    next.run(request).await
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

fn not_found(what: &str, id: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("{what} {id} does not exist"))
}

pub(crate) async fn open_jobs_handler(State(api): State<HiringApi>) -> Response {
    Json(api.service.open_jobs()).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplyQuery {
    apply: String,
}

pub(crate) async fn apply_lookup_handler(
    State(api): State<HiringApi>,
    Query(query): Query<ApplyQuery>,
) -> Response {
    match api.service.job_for_apply_link(&query.apply) {
        Some(job) => Json(job).into_response(),
        None => not_found("job", &query.apply),
    }
}

pub(crate) async fn submit_handler(
    State(api): State<HiringApi>,
    Path(job_id): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> Result<Response, AppError> {
    let receipt = api.service.submit_application(&JobId(job_id), form)?;
    Ok((StatusCode::ACCEPTED, Json(receipt.candidate)).into_response())
}

async fn list_jobs_handler(State(api): State<HiringApi>) -> Response {
    Json(api.service.jobs()).into_response()
}

async fn add_job_handler(State(api): State<HiringApi>) -> Result<Response, AppError> {
    let job = api.service.add_job()?;
    Ok((StatusCode::CREATED, Json(job)).into_response())
}

async fn update_job_handler(
    State(api): State<HiringApi>,
    Path(job_id): Path<String>,
    Json(field): Json<JobField>,
) -> Result<Response, AppError> {
    Ok(match api.service.update_job_field(&JobId(job_id.clone()), field)? {
        Some(job) => Json(job).into_response(),
        None => not_found("job", &job_id),
    })
}

async fn add_question_handler(
    State(api): State<HiringApi>,
    Path(job_id): Path<String>,
) -> Result<Response, AppError> {
    Ok(match api.service.add_question(&JobId(job_id.clone()))? {
        Some(job) => (StatusCode::CREATED, Json(job)).into_response(),
        None => not_found("job", &job_id),
    })
}

async fn update_question_handler(
    State(api): State<HiringApi>,
    Path((job_id, question_id)): Path<(String, String)>,
    Json(field): Json<QuestionField>,
) -> Result<Response, AppError> {
    let updated = api
        .service
        .update_question(&JobId(job_id), &QuestionId(question_id.clone()), field)?;
    Ok(match updated {
        Some(job) => Json(job).into_response(),
        None => not_found("question", &question_id),
    })
}

async fn delete_question_handler(
    State(api): State<HiringApi>,
    Path((job_id, question_id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let updated = api
        .service
        .delete_question(&JobId(job_id), &QuestionId(question_id.clone()))?;
    Ok(match updated {
        Some(job) => Json(job).into_response(),
        None => not_found("question", &question_id),
    })
}

async fn apply_link_handler(State(api): State<HiringApi>, Path(job_id): Path<String>) -> Response {
    match api.service.apply_link_for(&api.public_url, &JobId(job_id.clone())) {
        Some(link) => Json(json!({ "job_id": job_id, "link": link })).into_response(),
        None => not_found("job", &job_id),
    }
}

async fn pipeline_handler(State(api): State<HiringApi>, Path(job_id): Path<String>) -> Response {
    let id = JobId(job_id);
    match api.service.pipeline(&id) {
        Some(columns) => Json(json!({
            "job_id": id,
            "stats": api.service.stats(Some(&id)),
            "columns": columns,
        }))
        .into_response(),
        None => not_found("job", &id.0),
    }
}

#[derive(Debug, Deserialize)]
struct StatsQuery {
    job_id: Option<String>,
}

async fn stats_handler(State(api): State<HiringApi>, Query(query): Query<StatsQuery>) -> Response {
    let job_id = query.job_id.map(JobId);
    Json(api.service.stats(job_id.as_ref())).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChangeRequest {
    pub(crate) status: ApplicationStatus,
}

pub(crate) async fn status_change_handler(
    State(api): State<HiringApi>,
    Path(candidate_id): Path<String>,
    Json(request): Json<StatusChangeRequest>,
) -> Result<Response, AppError> {
    let outcome = api
        .service
        .request_status_change(&CandidateId(candidate_id), request.status)
        .await?;
    Ok(Json(outcome).into_response())
}

async fn pending_list_handler(State(api): State<HiringApi>) -> Response {
    Json(api.service.pending_transitions()).into_response()
}

async fn pending_handler(
    State(api): State<HiringApi>,
    Path(candidate_id): Path<String>,
) -> Response {
    match api.service.pending_transition(&CandidateId(candidate_id.clone())) {
        Some(view) => Json(view).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("nothing pending for candidate {candidate_id}"),
        ),
    }
}

async fn cancel_handler(State(api): State<HiringApi>, Path(candidate_id): Path<String>) -> Response {
    let cancelled = api.service.cancel(&CandidateId(candidate_id));
    Json(json!({ "cancelled": cancelled })).into_response()
}

async fn revise_draft_handler(
    State(api): State<HiringApi>,
    Path(candidate_id): Path<String>,
    Json(draft): Json<EmailDraft>,
) -> Response {
    match api.service.revise_draft(&CandidateId(candidate_id.clone()), draft) {
        Some(view) => Json(view).into_response(),
        None => error_response(
            StatusCode::CONFLICT,
            format!("no ready draft for candidate {candidate_id}"),
        ),
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApproveRequest {
    #[serde(default)]
    draft: Option<EmailDraft>,
}

/// An empty body approves the stored draft; anything else must parse as an [`ApproveRequest`].
fn approval_edits(body: &[u8]) -> Result<Option<EmailDraft>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice::<ApproveRequest>(body).map(|request| request.draft)
}

async fn approve_handler(
    State(api): State<HiringApi>,
    Path(candidate_id): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let edited = approval_edits(&body).map_err(AppError::InvalidBody)?;
    Ok(match api.service.approve_and_send(&CandidateId(candidate_id), edited)? {
        outcome @ ApprovalOutcome::Sent { .. } => Json(outcome).into_response(),
        outcome => (StatusCode::CONFLICT, Json(outcome)).into_response(),
    })
}

async fn refresh_summary_handler(
    State(api): State<HiringApi>,
    Path(candidate_id): Path<String>,
) -> Result<Response, AppError> {
    let refreshed = api
        .service
        .refresh_summary(&CandidateId(candidate_id.clone()))
        .await?;
    Ok(match refreshed {
        Some(candidate) => Json(candidate).into_response(),
        None => not_found("candidate", &candidate_id),
    })
}
