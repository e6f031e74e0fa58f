use serde::Serialize;

use crate::workflows::hiring::domain::ApplicationStatus;

/// What has to happen before a candidate may move to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRequirement {
    /// Commit straight away, no side effect.
    Immediate,
    /// Draft a status email and wait for a recruiter to approve it.
    EmailApproval,
}

/// Any status is reachable from any other; only the target decides the requirement.
pub const fn requirement_for(target: ApplicationStatus) -> TransitionRequirement {
    match target {
        ApplicationStatus::FirstInterview
        | ApplicationStatus::Selected
        | ApplicationStatus::Rejected => TransitionRequirement::EmailApproval,
        ApplicationStatus::New | ApplicationStatus::Screening => TransitionRequirement::Immediate,
    }
}
