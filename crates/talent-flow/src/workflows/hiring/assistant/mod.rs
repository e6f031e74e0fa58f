//! Generative drafting collaborator: status emails and one-line profile summaries.
//!
//! Implementations report failures as [`AssistantError`]; callers that need the
//! never-failing contract use [`draft_status_email_or_fallback`] and
//! [`summarize_profile_or_fallback`], which substitute fixed fallback values.

mod gemini;
pub mod prompts;

pub use gemini::GeminiAssistant;

use async_trait::async_trait;
use tracing::warn;

use super::domain::{ApplicationStatus, Candidate, EmailDraft};

/// Sentence stored when profile analysis cannot produce one.
pub const FALLBACK_SUMMARY: &str = "Could not analyze profile.";

#[async_trait]
pub trait DraftingAssistant: Send + Sync {
    async fn draft_status_email(
        &self,
        candidate: &Candidate,
        target: ApplicationStatus,
        job_title: &str,
    ) -> Result<EmailDraft, AssistantError>;

    async fn summarize_profile(
        &self,
        candidate: &Candidate,
        job_title: &str,
    ) -> Result<String, AssistantError>;

    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("drafting assistant is not configured")]
    NotConfigured,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("assistant returned empty content")]
    EmptyContent,
}

/// Stand-in used when no API key is configured; every call fails so fallbacks apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAssistant;

#[async_trait]
impl DraftingAssistant for DisabledAssistant {
    async fn draft_status_email(
        &self,
        _candidate: &Candidate,
        _target: ApplicationStatus,
        _job_title: &str,
    ) -> Result<EmailDraft, AssistantError> {
        Err(AssistantError::NotConfigured)
    }

    async fn summarize_profile(
        &self,
        _candidate: &Candidate,
        _job_title: &str,
    ) -> Result<String, AssistantError> {
        Err(AssistantError::NotConfigured)
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

/// Template used when the assistant cannot draft; the recruiter writes the body by hand.
pub fn fallback_email(candidate: &Candidate, job_title: &str) -> EmailDraft {
    EmailDraft {
        subject: format!("Update regarding your application for {job_title}"),
        body: format!(
            "Dear {},\n\nCould not generate automated draft. Please write manually.\n\nBest,\nHR Team",
            candidate.full_name
        ),
    }
}

pub async fn draft_status_email_or_fallback(
    assistant: &dyn DraftingAssistant,
    candidate: &Candidate,
    target: ApplicationStatus,
    job_title: &str,
) -> EmailDraft {
    match assistant
        .draft_status_email(candidate, target, job_title)
        .await
    {
        Ok(draft) => draft,
        Err(err) => {
            warn!(
                assistant = assistant.name(),
                candidate_id = %candidate.id,
                target = %target,
                error = %err,
                "email drafting failed; using fallback draft"
            );
            fallback_email(candidate, job_title)
        }
    }
}

pub async fn summarize_profile_or_fallback(
    assistant: &dyn DraftingAssistant,
    candidate: &Candidate,
    job_title: &str,
) -> String {
    match assistant.summarize_profile(candidate, job_title).await {
        Ok(summary) => summary,
        Err(err) => {
            warn!(
                assistant = assistant.name(),
                candidate_id = %candidate.id,
                error = %err,
                "profile analysis failed; using fallback summary"
            );
            FALLBACK_SUMMARY.to_string()
        }
    }
}
