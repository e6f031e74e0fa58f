use serde::Serialize;

use crate::workflows::hiring::domain::{ApplicationStatus, Candidate, JobId};

/// One kanban column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineColumn {
    pub status: ApplicationStatus,
    pub label: &'static str,
    pub candidates: Vec<Candidate>,
}

impl PipelineColumn {
    /// All five columns in board order, each keeping collection order.
    pub fn for_job(candidates: &[Candidate], job_id: &JobId) -> Vec<Self> {
        ApplicationStatus::ALL
            .into_iter()
            .map(|status| PipelineColumn {
                status,
                label: status.column_label(),
                candidates: candidates
                    .iter()
                    .filter(|candidate| &candidate.job_id == job_id && candidate.status == status)
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: ApplicationStatus,
    pub count: usize,
}

/// Headline numbers for the recruiter overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub total: usize,
    pub active: usize,
    pub hired: usize,
    pub rejected: usize,
    pub by_status: Vec<StatusCount>,
}

impl PipelineStats {
    pub fn from_candidates<'a>(candidates: impl IntoIterator<Item = &'a Candidate>) -> Self {
        let mut counts = [0usize; 5];
        for candidate in candidates {
            if let Some(slot) = ApplicationStatus::ALL
                .iter()
                .position(|status| *status == candidate.status)
            {
                counts[slot] += 1;
            }
        }

        let count_of = |status: ApplicationStatus| {
            ApplicationStatus::ALL
                .iter()
                .position(|entry| *entry == status)
                .map_or(0, |slot| counts[slot])
        };

        let by_status: Vec<StatusCount> = ApplicationStatus::ALL
            .into_iter()
            .map(|status| StatusCount {
                status,
                count: count_of(status),
            })
            .collect();

        Self {
            total: counts.iter().sum(),
            active: by_status
                .iter()
                .filter(|entry| entry.status.is_open())
                .map(|entry| entry.count)
                .sum(),
            hired: count_of(ApplicationStatus::Selected),
            rejected: count_of(ApplicationStatus::Rejected),
            by_status,
        }
    }
}
