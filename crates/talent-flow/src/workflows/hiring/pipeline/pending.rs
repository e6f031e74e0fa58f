use serde::Serialize;

use crate::workflows::hiring::domain::{ApplicationStatus, CandidateId, EmailDraft};

/// Status change parked until its email is approved or cancelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransition {
    pub candidate_name: String,
    pub target: ApplicationStatus,
    pub phase: DraftPhase,
    /// Draft responses are applied only if the entry still carries the ticket they were issued for.
    pub(crate) ticket: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftPhase {
    Loading,
    Ready(EmailDraft),
}

impl PendingTransition {
    pub(crate) fn loading(candidate_name: String, target: ApplicationStatus, ticket: u64) -> Self {
        Self {
            candidate_name,
            target,
            phase: DraftPhase::Loading,
            ticket,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, DraftPhase::Loading)
    }

    pub fn view(&self, candidate_id: &CandidateId) -> PendingTransitionView {
        let (phase, draft) = match &self.phase {
            DraftPhase::Loading => ("loading", None),
            DraftPhase::Ready(draft) => ("draft_ready", Some(draft.clone())),
        };

        PendingTransitionView {
            candidate_id: candidate_id.clone(),
            candidate_name: self.candidate_name.clone(),
            target: self.target,
            phase,
            draft,
        }
    }
}

/// What the approval dialog shows for one pending change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTransitionView {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub target: ApplicationStatus,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<EmailDraft>,
}
