use serde::Serialize;
use tracing::{debug, info, warn};

use super::pending::{DraftPhase, PendingTransition, PendingTransitionView};
use super::policy::{requirement_for, TransitionRequirement};
use crate::workflows::hiring::assistant::draft_status_email_or_fallback;
use crate::workflows::hiring::domain::{ApplicationStatus, Candidate, CandidateId, EmailDraft};
use crate::workflows::hiring::mailer::OutboundEmail;
use crate::workflows::hiring::service::{HiringError, HiringService};

/// Result of asking to move a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    /// Status written and saved.
    Committed { candidate: Candidate },
    /// Draft ready; the change waits for `approve_and_send` or `cancel`.
    AwaitingApproval { pending: PendingTransitionView },
    /// The draft came back after the request was cancelled or replaced; it was dropped.
    Superseded,
    /// No candidate with that id; nothing changed.
    UnknownCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApprovalOutcome {
    Sent {
        candidate: Candidate,
        email: OutboundEmail,
        delivery: Delivery,
    },
    NothingPending,
    DraftLoading,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Delivery {
    Delivered,
    Failed { reason: String },
}

impl HiringService {
    /// Moves a candidate to `target`, or parks the move behind an email draft when the policy
    /// asks for approval.
    ///
    /// While the draft is being generated the pending entry reports the `loading` phase. A new
    /// request for the same candidate replaces an older pending one.
    pub async fn request_status_change(
        &self,
        candidate_id: &CandidateId,
        target: ApplicationStatus,
    ) -> Result<TransitionOutcome, HiringError> {
        let (candidate, job_title, ticket) = {
            let mut board = self.board.lock();
            let Some(candidate) = board.candidate(candidate_id).cloned() else {
                debug!(%candidate_id, %target, "status change for unknown candidate ignored");
                return Ok(TransitionOutcome::UnknownCandidate);
            };

            match requirement_for(target) {
                TransitionRequirement::Immediate => {
                    let Some(updated) =
                        self.commit_candidate(&mut board, candidate_id, |candidate| {
                            candidate.status = target;
                        })?
                    else {
                        return Ok(TransitionOutcome::UnknownCandidate);
                    };
                    board.pending.remove(candidate_id);
                    info!(%candidate_id, from = %candidate.status, to = %target, "status committed");
                    return Ok(TransitionOutcome::Committed { candidate: updated });
                }
                TransitionRequirement::EmailApproval => {
                    let job_title = board.job_title_for(&candidate);
                    let ticket = board.issue_ticket();
                    board.pending.insert(
                        candidate_id.clone(),
                        PendingTransition::loading(candidate.full_name.clone(), target, ticket),
                    );
                    (candidate, job_title, ticket)
                }
            }
        };

        debug!(%candidate_id, %target, ticket, "drafting status email");
        let draft =
            draft_status_email_or_fallback(self.assistant.as_ref(), &candidate, target, &job_title)
                .await;

        let mut board = self.board.lock();
        match board.pending.get_mut(candidate_id) {
            Some(pending) if pending.ticket == ticket => {
                pending.phase = DraftPhase::Ready(draft);
                info!(%candidate_id, %target, "status email awaiting approval");
                Ok(TransitionOutcome::AwaitingApproval {
                    pending: pending.view(candidate_id),
                })
            }
            _ => {
                debug!(%candidate_id, ticket, "stale draft discarded");
                Ok(TransitionOutcome::Superseded)
            }
        }
    }

    /// Commits the pending status and hands the email to the mailer.
    ///
    /// `edited` replaces the stored draft when the recruiter changed it in the dialog. If the
    /// save fails the pending change is kept so the approval can be retried.
    pub fn approve_and_send(
        &self,
        candidate_id: &CandidateId,
        edited: Option<EmailDraft>,
    ) -> Result<ApprovalOutcome, HiringError> {
        let (candidate, draft, target) = {
            let mut board = self.board.lock();
            let Some(pending) = board.pending.get(candidate_id) else {
                return Ok(ApprovalOutcome::NothingPending);
            };
            let target = pending.target;
            let draft = match (&pending.phase, edited) {
                (DraftPhase::Loading, _) => return Ok(ApprovalOutcome::DraftLoading),
                (DraftPhase::Ready(_), Some(edited)) => edited,
                (DraftPhase::Ready(stored), None) => stored.clone(),
            };

            let committed = self.commit_candidate(&mut board, candidate_id, |candidate| {
                candidate.status = target;
            })?;
            board.pending.remove(candidate_id);
            match committed {
                Some(candidate) => (candidate, draft, target),
                None => return Ok(ApprovalOutcome::NothingPending),
            }
        };

        info!(%candidate_id, %target, "status committed after email approval");

        let email = OutboundEmail {
            candidate_id: candidate.id.clone(),
            to: candidate.email.clone(),
            status: target,
            subject: draft.subject,
            body: draft.body,
        };
        let delivery = match self.mailer.deliver(&email) {
            Ok(()) => Delivery::Delivered,
            Err(err) => {
                warn!(%candidate_id, error = %err, "status email delivery failed");
                Delivery::Failed {
                    reason: err.to_string(),
                }
            }
        };

        Ok(ApprovalOutcome::Sent {
            candidate,
            email,
            delivery,
        })
    }

    /// Drops the pending change; the candidate keeps its status. A draft still in flight is
    /// discarded when it arrives. Returns whether anything was pending.
    pub fn cancel(&self, candidate_id: &CandidateId) -> bool {
        let removed = self.board.lock().pending.remove(candidate_id).is_some();
        if removed {
            info!(%candidate_id, "pending status change cancelled");
        }
        removed
    }

    /// Stores recruiter edits to a ready draft. `None` when no draft is ready for the candidate.
    pub fn revise_draft(
        &self,
        candidate_id: &CandidateId,
        draft: EmailDraft,
    ) -> Option<PendingTransitionView> {
        let mut board = self.board.lock();
        let pending = board.pending.get_mut(candidate_id)?;
        if pending.is_loading() {
            return None;
        }
        pending.phase = DraftPhase::Ready(draft);
        Some(pending.view(candidate_id))
    }

    pub fn pending_transition(&self, candidate_id: &CandidateId) -> Option<PendingTransitionView> {
        self.board
            .lock()
            .pending
            .get(candidate_id)
            .map(|pending| pending.view(candidate_id))
    }

    /// Every pending change, ordered by candidate id.
    pub fn pending_transitions(&self) -> Vec<PendingTransitionView> {
        let board = self.board.lock();
        let mut views: Vec<PendingTransitionView> = board
            .pending
            .iter()
            .map(|(candidate_id, pending)| pending.view(candidate_id))
            .collect();
        views.sort_by(|left, right| left.candidate_id.cmp(&right.candidate_id));
        views
    }
}
