use super::common::*;
use std::collections::HashSet;

use crate::workflows::hiring::assistant::FALLBACK_SUMMARY;
use crate::workflows::hiring::domain::{ApplicationStatus, JobStatus};
use crate::workflows::hiring::jobs::JobField;
use crate::workflows::hiring::service::HiringError;

#[tokio::test]
async fn submission_lands_in_new_applications() {
    let board = scripted_board();

    let receipt = board
        .service
        .submit_application(&job("job1"), application_form())
        .expect("submission");
    let candidate = receipt.candidate.clone();

    assert!(candidate.id.0.starts_with("c-"));
    assert_eq!(candidate.job_id, job("job1"));
    assert_eq!(candidate.status, ApplicationStatus::New);
    assert_eq!(candidate.skills, vec!["React", "Go"]);
    assert_eq!(candidate.notes.as_deref(), Some("Available from March."));
    assert!(candidate.ai_summary.is_none());
    assert_eq!(
        candidate
            .custom_answers
            .as_ref()
            .and_then(|answers| answers.values().next())
            .map(String::as_str),
        Some("github.com/erin")
    );

    let stored = board.store.stored_candidates();
    assert_eq!(stored.len(), 5);
    assert_eq!(stored.last().map(|c| &c.id), Some(&candidate.id));

    receipt.enrichment.await.expect("enrichment task");
}

#[tokio::test]
async fn background_analysis_patches_the_summary() {
    let board = scripted_board();

    let receipt = board
        .service
        .submit_application(&job("job1"), application_form())
        .expect("submission");
    let candidate_id = receipt.candidate.id.clone();
    receipt.enrichment.await.expect("enrichment task");

    let enriched = board.service.candidate(&candidate_id).expect("candidate");
    assert_eq!(
        enriched.ai_summary,
        Some(scripted_summary(&receipt.candidate, "Frontend Engineer"))
    );
    assert_eq!(board.assistant.summaries_requested(), 1);

    let stored = board.store.stored_candidates();
    let stored = stored
        .iter()
        .find(|c| c.id == candidate_id)
        .expect("stored candidate");
    assert!(stored.ai_summary.is_some());
}

#[tokio::test]
async fn failed_analysis_leaves_the_summary_unset() {
    let board = offline_board();

    let receipt = board
        .service
        .submit_application(&job("job2"), application_form())
        .expect("submission");
    let candidate_id = receipt.candidate.id.clone();
    receipt.enrichment.await.expect("enrichment task");

    let candidate = board.service.candidate(&candidate_id).expect("candidate");
    assert!(candidate.ai_summary.is_none());
}

#[tokio::test]
async fn refresh_summary_stores_the_fallback_sentence() {
    let board = offline_board();

    let refreshed = board
        .service
        .refresh_summary(&id("c2"))
        .await
        .expect("refresh")
        .expect("c2 exists");
    assert_eq!(refreshed.ai_summary.as_deref(), Some(FALLBACK_SUMMARY));

    let missing = board
        .service
        .refresh_summary(&id("c404"))
        .await
        .expect("refresh");
    assert!(missing.is_none());
}

#[tokio::test]
async fn rapid_submissions_get_distinct_ids() {
    let board = scripted_board();
    let mut ids = HashSet::new();

    for _ in 0..20 {
        let receipt = board
            .service
            .submit_application(&job("job1"), application_form())
            .expect("submission");
        ids.insert(receipt.candidate.id.clone());
        receipt.enrichment.await.expect("enrichment task");
    }

    assert_eq!(ids.len(), 20);
    assert_eq!(board.service.candidates().len(), 24);
}

#[tokio::test]
async fn empty_optional_fields_are_not_stored() {
    let board = scripted_board();
    let mut form = application_form();
    form.notes = Some("   ".to_string());
    form.custom_answers.clear();

    let receipt = board
        .service
        .submit_application(&job("job1"), form)
        .expect("submission");

    assert!(receipt.candidate.notes.is_none());
    assert!(receipt.candidate.custom_answers.is_none());
    receipt.enrichment.await.expect("enrichment task");
}

#[tokio::test]
async fn unknown_job_is_rejected() {
    let board = scripted_board();

    let result = board
        .service
        .submit_application(&job("job404"), application_form());

    assert!(matches!(result, Err(HiringError::UnknownJob(ref job_id)) if job_id.0 == "job404"));
    assert_eq!(board.service.candidates().len(), 4);
}

#[tokio::test]
async fn closed_job_is_rejected() {
    let board = scripted_board();
    board
        .service
        .update_job_field(&job("job2"), JobField::Status(JobStatus::Closed))
        .expect("close job")
        .expect("job2 exists");

    let result = board
        .service
        .submit_application(&job("job2"), application_form());

    assert!(matches!(result, Err(HiringError::JobClosed(_))));
    assert_eq!(board.assistant.summaries_requested(), 0);
}

#[tokio::test]
async fn failed_save_rejects_the_submission() {
    let board = scripted_board();
    board.store.fail_writes(true);

    let result = board
        .service
        .submit_application(&job("job1"), application_form());

    assert!(matches!(result, Err(HiringError::Store(_))));
    assert_eq!(board.service.candidates().len(), 4);
}
