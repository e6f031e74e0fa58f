use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{ApplicationStatus, CandidateId};

/// Approved status email addressed to a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub candidate_id: CandidateId,
    pub to: String,
    pub status: ApplicationStatus,
    pub subject: String,
    pub body: String,
}

/// Hand-off point for approved emails (SMTP relay, transactional provider, ...).
pub trait OutboundMailer: Send + Sync {
    fn deliver(&self, email: &OutboundEmail) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport unavailable: {0}")]
    Transport(String),
    #[error("recipient address rejected: {0}")]
    Rejected(String),
}

/// Records approved emails in the structured log instead of sending them.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

impl OutboundMailer for LogMailer {
    fn deliver(&self, email: &OutboundEmail) -> Result<(), MailError> {
        if !email.to.contains('@') {
            return Err(MailError::Rejected(email.to.clone()));
        }
        info!(
            candidate_id = %email.candidate_id,
            to = %email.to,
            status = %email.status,
            subject = %email.subject,
            "status email approved"
        );
        Ok(())
    }
}
