//! Recruiting board: job postings with custom application questions, candidate intake with
//! background profile analysis, and the status pipeline whose candidate-facing moves wait
//! behind an approved email.

pub mod assistant;
pub mod domain;
pub mod intake;
pub mod jobs;
pub mod mailer;
pub mod pipeline;
pub mod router;
pub mod seed;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use assistant::{AssistantError, DisabledAssistant, DraftingAssistant, GeminiAssistant};
pub use domain::{
    AnswerKind, ApplicationForm, ApplicationStatus, Candidate, CandidateId, EmailDraft,
    FormQuestion, Job, JobId, JobStatus, QuestionId,
};
pub use intake::IntakeReceipt;
pub use jobs::{apply_link, JobField, QuestionField};
pub use mailer::{LogMailer, MailError, OutboundEmail, OutboundMailer};
pub use pipeline::{
    ApprovalOutcome, Delivery, PendingTransitionView, PipelineColumn, PipelineStats,
    TransitionOutcome,
};
pub use router::{hiring_router, HiringApi, RECRUITER_HEADER};
pub use seed::Seed;
pub use service::{HiringError, HiringService};
pub use store::{CollectionStore, FileStore, KeyValueStore, MemoryStore, StoreError};
