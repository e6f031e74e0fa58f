//! Candidate status workflow: which moves need an approved email, the pending approvals,
//! and the board views built from the candidate collection.

mod board;
mod pending;
mod policy;
mod workflow;

pub use board::{PipelineColumn, PipelineStats, StatusCount};
pub use pending::{DraftPhase, PendingTransition, PendingTransitionView};
pub use policy::{requirement_for, TransitionRequirement};
pub use workflow::{ApprovalOutcome, Delivery, TransitionOutcome};
