use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::workflows::hiring::domain::{ApplicationStatus, JobStatus};
use crate::workflows::hiring::jobs::JobField;
use crate::workflows::hiring::router::{self, StatusChangeRequest, RECRUITER_HEADER};

fn recruiter_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(RECRUITER_HEADER, PASSWORD);
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

#[tokio::test]
async fn public_listing_hides_closed_jobs() {
    let board = scripted_board();
    board
        .service
        .update_job_field(&job("job2"), JobField::Status(JobStatus::Closed))
        .expect("close job");

    let response = router_for(board.service.clone())
        .oneshot(
            Request::builder()
                .uri("/api/v1/jobs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let jobs = body.as_array().expect("job array");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["id"], json!("job1"));
    assert_eq!(jobs[0]["questions"][1]["type"], json!("long_text"));
}

#[tokio::test]
async fn apply_lookup_returns_the_job_or_404() {
    let board = scripted_board();
    let app = router_for(board.service.clone());

    let found = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/apply?apply=job2")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(found.status(), StatusCode::OK);
    assert_eq!(read_json_body(found).await["title"], json!("HR Assistant"));

    let missing = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/apply?apply=job404")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn application_is_accepted() {
    let board = scripted_board();
    let payload = json!({
        "fullName": "Erin Park",
        "email": "erin@example.com",
        "phone": "555-0199",
        "experienceYears": 4,
        "skills": "React, , Go",
        "customAnswers": { "q1": "github.com/erin" }
    });

    let response = router_for(board.service.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/jobs/job1/applications")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], json!("New Application"));
    assert_eq!(body["skills"], json!(["React", "Go"]));
    assert_eq!(body["customAnswers"]["q1"], json!("github.com/erin"));
    assert!(body.get("aiSummary").is_none());
    assert_eq!(board.service.candidates().len(), 5);
}

#[tokio::test]
async fn application_to_missing_or_closed_job_maps_to_client_errors() {
    let board = scripted_board();
    board
        .service
        .update_job_field(&job("job2"), JobField::Status(JobStatus::Closed))
        .expect("close job");
    let app = router_for(board.service.clone());
    let payload = json!({ "fullName": "Erin", "email": "e@example.com", "phone": "1" });

    let missing = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/jobs/job404/applications")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let closed = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/jobs/job2/applications")
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(closed.status(), StatusCode::CONFLICT);
    let body = read_json_body(closed).await;
    assert!(body["error"].as_str().expect("message").contains("closed"));
}

#[tokio::test]
async fn recruiter_routes_require_the_password() {
    let board = scripted_board();
    let app = router_for(board.service.clone());

    let anonymous = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/recruiter/jobs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let wrong = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/recruiter/jobs")
                .header(RECRUITER_HEADER, "admin")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let allowed = app
        .oneshot(recruiter_request("GET", "/api/v1/recruiter/jobs", None))
        .await
        .expect("response");
    assert_eq!(allowed.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(allowed).await.as_array().map(Vec::len),
        Some(2)
    );
}

#[tokio::test]
async fn status_change_then_approval_over_http() {
    let board = scripted_board();
    let app = router_for(board.service.clone());

    let requested = app
        .clone()
        .oneshot(recruiter_request(
            "POST",
            "/api/v1/recruiter/candidates/c2/status",
            Some(json!({ "status": "SELECTED" })),
        ))
        .await
        .expect("response");
    assert_eq!(requested.status(), StatusCode::OK);
    let body = read_json_body(requested).await;
    assert_eq!(body["outcome"], json!("awaiting_approval"));
    assert_eq!(body["pending"]["phase"], json!("draft_ready"));
    assert_eq!(body["pending"]["target"], json!("Selected"));

    let approved = app
        .clone()
        .oneshot(recruiter_request(
            "POST",
            "/api/v1/recruiter/candidates/c2/pending/approve",
            Some(json!({ "draft": { "subject": "Welcome aboard", "body": "Hi Bob" } })),
        ))
        .await
        .expect("response");
    assert_eq!(approved.status(), StatusCode::OK);
    let body = read_json_body(approved).await;
    assert_eq!(body["outcome"], json!("sent"));
    assert_eq!(body["candidate"]["status"], json!("Selected"));
    assert_eq!(body["delivery"]["state"], json!("delivered"));
    assert_eq!(board.mailer.sent()[0].subject, "Welcome aboard");

    let again = app
        .oneshot(recruiter_request(
            "POST",
            "/api/v1/recruiter/candidates/c2/pending/approve",
            None,
        ))
        .await
        .expect("response");
    assert_eq!(again.status(), StatusCode::CONFLICT);
    assert_eq!(read_json_body(again).await["outcome"], json!("nothing_pending"));
}

fn approval_with_raw_body(candidate: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/api/v1/recruiter/candidates/{candidate}/pending/approve"))
        .header(RECRUITER_HEADER, PASSWORD)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .expect("request")
}

#[tokio::test]
async fn unreadable_approval_body_leaves_the_transition_pending() {
    let board = scripted_board();
    let app = router_for(board.service.clone());
    let before = board.service.candidate(&id("c2")).expect("c2 exists");

    let requested = app
        .clone()
        .oneshot(recruiter_request(
            "POST",
            "/api/v1/recruiter/candidates/c2/status",
            Some(json!({ "status": "SELECTED" })),
        ))
        .await
        .expect("response");
    assert_eq!(read_json_body(requested).await["outcome"], json!("awaiting_approval"));

    for body in [
        r#"{"draft":{"subject":"Edited subject"}}"#,
        r#"{"draft":"#,
        r#"{"subject":"Edited subject","body":"Edited body"}"#,
    ] {
        let rejected = app
            .clone()
            .oneshot(approval_with_raw_body("c2", body))
            .await
            .expect("response");
        assert_eq!(rejected.status(), StatusCode::BAD_REQUEST, "body {body}");
        let error = read_json_body(rejected).await;
        assert!(error["error"]
            .as_str()
            .expect("message")
            .starts_with("invalid request body"));
    }

    let after = board.service.candidate(&id("c2")).expect("c2 exists");
    assert_eq!(after.status, before.status);
    assert!(board.service.pending_transition(&id("c2")).is_some());
    assert!(board.mailer.sent().is_empty());

    let approved = app
        .oneshot(approval_with_raw_body("c2", "  \n"))
        .await
        .expect("response");
    assert_eq!(approved.status(), StatusCode::OK);
    let stored = scripted_draft(&before, ApplicationStatus::Selected);
    assert_eq!(board.mailer.sent()[0].subject, stored.subject);
    assert_eq!(
        board.service.candidate(&id("c2")).map(|candidate| candidate.status),
        Some(ApplicationStatus::Selected)
    );
}

#[tokio::test]
async fn failed_save_surfaces_as_server_error() {
    let board = scripted_board();
    board.store.fail_writes(true);

    let response = router_for(board.service.clone())
        .oneshot(recruiter_request("POST", "/api/v1/recruiter/jobs", None))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json_body(response).await;
    assert!(body["error"].as_str().expect("message").contains("disk full"));
    assert_eq!(board.service.jobs().len(), 2);
}

#[tokio::test]
async fn status_handler_commits_screening_directly() {
    let board = scripted_board();
    let api = api_for(board.service.clone());

    let response = router::status_change_handler(
        State(api),
        Path("c4".to_string()),
        axum::Json(StatusChangeRequest {
            status: ApplicationStatus::Screening,
        }),
    )
    .await
    .expect("status change succeeds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["outcome"], json!("committed"));
    assert_eq!(body["candidate"]["status"], json!("Screening"));
}

#[tokio::test]
async fn pipeline_and_link_views() {
    let board = scripted_board();
    let app = router_for(board.service.clone());

    let pipeline = app
        .clone()
        .oneshot(recruiter_request("GET", "/api/v1/recruiter/jobs/job1/pipeline", None))
        .await
        .expect("response");
    assert_eq!(pipeline.status(), StatusCode::OK);
    let body = read_json_body(pipeline).await;
    assert_eq!(body["columns"][0]["label"], json!("New Applications"));
    assert_eq!(body["columns"][0]["candidates"][0]["id"], json!("c2"));
    assert_eq!(body["stats"]["total"], json!(3));

    let link = app
        .clone()
        .oneshot(recruiter_request("GET", "/api/v1/recruiter/jobs/job1/link", None))
        .await
        .expect("response");
    assert_eq!(
        read_json_body(link).await["link"],
        json!("https://careers.example.com?apply=job1")
    );

    let stats = app
        .oneshot(recruiter_request("GET", "/api/v1/recruiter/stats", None))
        .await
        .expect("response");
    assert_eq!(read_json_body(stats).await["total"], json!(4));
}

#[tokio::test]
async fn job_editor_over_http() {
    let board = scripted_board();
    let app = router_for(board.service.clone());

    let created = app
        .clone()
        .oneshot(recruiter_request("POST", "/api/v1/recruiter/jobs", None))
        .await
        .expect("response");
    assert_eq!(created.status(), StatusCode::CREATED);
    let job_id = read_json_body(created).await["id"]
        .as_str()
        .expect("job id")
        .to_string();

    let renamed = app
        .clone()
        .oneshot(recruiter_request(
            "PATCH",
            &format!("/api/v1/recruiter/jobs/{job_id}"),
            Some(json!({ "field": "title", "value": "Data Engineer" })),
        ))
        .await
        .expect("response");
    assert_eq!(renamed.status(), StatusCode::OK);
    assert_eq!(read_json_body(renamed).await["title"], json!("Data Engineer"));

    let missing = app
        .oneshot(recruiter_request(
            "DELETE",
            "/api/v1/recruiter/jobs/job1/questions/q404",
            None,
        ))
        .await
        .expect("response");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
