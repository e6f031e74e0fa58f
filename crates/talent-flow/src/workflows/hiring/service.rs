use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tracing::info;

use super::assistant::DraftingAssistant;
use super::domain::{Candidate, CandidateId, Job, JobId};
use super::mailer::OutboundMailer;
use super::pipeline::{PendingTransition, PipelineColumn, PipelineStats};
use super::seed::Seed;
use super::store::{CollectionStore, KeyValueStore, StoreError};

/// Title used in drafts when a candidate's job cannot be resolved.
pub const UNKNOWN_ROLE_TITLE: &str = "the role";

static ID_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn fresh_id(prefix: &str) -> String {
    let sequence = ID_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{}-{sequence}", Utc::now().timestamp_millis())
}

/// Everything the board holds in memory: both collections and the pending email approvals.
#[derive(Debug, Default)]
pub(crate) struct BoardState {
    pub(crate) jobs: Vec<Job>,
    pub(crate) candidates: Vec<Candidate>,
    pub(crate) pending: HashMap<CandidateId, PendingTransition>,
    next_ticket: u64,
}

impl BoardState {
    pub(crate) fn job(&self, id: &JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| &job.id == id)
    }

    pub(crate) fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| &candidate.id == id)
    }

    pub(crate) fn job_title_for(&self, candidate: &Candidate) -> String {
        self.job(&candidate.job_id)
            .map(|job| job.title.clone())
            .unwrap_or_else(|| UNKNOWN_ROLE_TITLE.to_string())
    }

    pub(crate) fn issue_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    pub(crate) fn fresh_candidate_id(&self) -> CandidateId {
        loop {
            let id = CandidateId(fresh_id("c"));
            if self.candidate(&id).is_none() {
                return id;
            }
        }
    }

    pub(crate) fn fresh_job_id(&self) -> JobId {
        loop {
            let id = JobId(fresh_id("job"));
            if self.job(&id).is_none() {
                return id;
            }
        }
    }
}

/// Recruiting board service: job postings, candidate intake, and the status workflow.
///
/// Cloning is cheap; clones share the same board. Every mutation is committed as one unit:
/// the affected collection is rebuilt, saved in full, and only then swapped into memory, so a
/// failed save leaves the in-memory board untouched.
#[derive(Clone)]
pub struct HiringService {
    pub(crate) store: CollectionStore,
    pub(crate) assistant: Arc<dyn DraftingAssistant>,
    pub(crate) mailer: Arc<dyn OutboundMailer>,
    pub(crate) board: Arc<Mutex<BoardState>>,
}

impl HiringService {
    /// Opens the board, seeding it with the demo collections on first run.
    pub fn load(
        backend: Arc<dyn KeyValueStore>,
        assistant: Arc<dyn DraftingAssistant>,
        mailer: Arc<dyn OutboundMailer>,
    ) -> Result<Self, HiringError> {
        Self::with_seed(backend, assistant, mailer, Seed::demo())
    }

    pub fn with_seed(
        backend: Arc<dyn KeyValueStore>,
        assistant: Arc<dyn DraftingAssistant>,
        mailer: Arc<dyn OutboundMailer>,
        seed: Seed,
    ) -> Result<Self, HiringError> {
        let store = CollectionStore::new(backend);
        let Seed { jobs, candidates } = store.load_board(seed)?;
        info!(
            jobs = jobs.len(),
            candidates = candidates.len(),
            assistant = assistant.name(),
            "hiring board loaded"
        );

        Ok(Self {
            store,
            assistant,
            mailer,
            board: Arc::new(Mutex::new(BoardState {
                jobs,
                candidates,
                ..BoardState::default()
            })),
        })
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.board.lock().jobs.clone()
    }

    /// Jobs listed on the public careers page.
    pub fn open_jobs(&self) -> Vec<Job> {
        self.board
            .lock()
            .jobs
            .iter()
            .filter(|job| job.is_active())
            .cloned()
            .collect()
    }

    pub fn job(&self, id: &JobId) -> Option<Job> {
        self.board.lock().job(id).cloned()
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.board.lock().candidates.clone()
    }

    pub fn candidates_for_job(&self, job_id: &JobId) -> Vec<Candidate> {
        self.board
            .lock()
            .candidates
            .iter()
            .filter(|candidate| &candidate.job_id == job_id)
            .cloned()
            .collect()
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<Candidate> {
        self.board.lock().candidate(id).cloned()
    }

    /// Kanban columns for one job; `None` when the job does not exist.
    pub fn pipeline(&self, job_id: &JobId) -> Option<Vec<PipelineColumn>> {
        let board = self.board.lock();
        board.job(job_id)?;
        Some(PipelineColumn::for_job(&board.candidates, job_id))
    }

    /// Counts across every candidate, or only those of `job_id`.
    pub fn stats(&self, job_id: Option<&JobId>) -> PipelineStats {
        let board = self.board.lock();
        PipelineStats::from_candidates(
            board
                .candidates
                .iter()
                .filter(|candidate| job_id.map_or(true, |id| &candidate.job_id == id)),
        )
    }

    /// Applies `apply` to one candidate and commits the whole collection.
    ///
    /// The caller holds the board lock across the save, which keeps disk and memory in commit
    /// order.
    ///
    /// Returns `Ok(None)` without saving when the candidate does not exist.
    pub(crate) fn commit_candidate<F>(
        &self,
        board: &mut BoardState,
        id: &CandidateId,
        apply: F,
    ) -> Result<Option<Candidate>, StoreError>
    where
        F: FnOnce(&mut Candidate),
    {
        let Some(index) = board
            .candidates
            .iter()
            .position(|candidate| &candidate.id == id)
        else {
            return Ok(None);
        };

        let mut next = board.candidates.clone();
        apply(&mut next[index]);
        self.store.save_candidates(&next)?;

        let updated = next[index].clone();
        board.candidates = next;
        Ok(Some(updated))
    }

    pub(crate) fn commit_new_candidate(
        &self,
        board: &mut BoardState,
        candidate: Candidate,
    ) -> Result<(), StoreError> {
        let mut next = board.candidates.clone();
        next.push(candidate);
        self.store.save_candidates(&next)?;
        board.candidates = next;
        Ok(())
    }

    pub(crate) fn commit_jobs(
        &self,
        board: &mut BoardState,
        next: Vec<Job>,
    ) -> Result<(), StoreError> {
        self.store.save_jobs(&next)?;
        board.jobs = next;
        Ok(())
    }
}

/// Error raised by the hiring service.
#[derive(Debug, thiserror::Error)]
pub enum HiringError {
    #[error("job {0} does not exist")]
    UnknownJob(JobId),
    #[error("job {0} is closed to new applications")]
    JobClosed(JobId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
