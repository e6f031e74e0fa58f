use chrono::Local;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::assistant::summarize_profile_or_fallback;
use super::domain::{parse_skills, ApplicationForm, ApplicationStatus, Candidate, CandidateId, JobId};
use super::service::{HiringError, HiringService};

/// Stored candidate plus the detached profile analysis started for it.
#[derive(Debug)]
pub struct IntakeReceipt {
    pub candidate: Candidate,
    /// Finishes once `aiSummary` has been patched (or the analysis failed). Dropping it
    /// leaves the task running.
    pub enrichment: JoinHandle<()>,
}

impl HiringService {
    /// Stores a new application in the `New Application` column and starts the background
    /// profile analysis. Must be called from within a Tokio runtime.
    pub fn submit_application(
        &self,
        job_id: &JobId,
        form: ApplicationForm,
    ) -> Result<IntakeReceipt, HiringError> {
        let (candidate, job_title) = {
            let mut board = self.board.lock();
            let job = board
                .job(job_id)
                .ok_or_else(|| HiringError::UnknownJob(job_id.clone()))?;
            if !job.is_active() {
                return Err(HiringError::JobClosed(job_id.clone()));
            }
            let job_title = job.title.clone();

            let ApplicationForm {
                full_name,
                email,
                phone,
                experience_years,
                skills,
                notes,
                custom_answers,
            } = form;

            let candidate = Candidate {
                id: board.fresh_candidate_id(),
                job_id: job_id.clone(),
                full_name,
                email,
                phone,
                experience_years,
                skills: parse_skills(&skills),
                status: ApplicationStatus::New,
                applied_date: Local::now().date_naive(),
                notes: notes.filter(|text| !text.trim().is_empty()),
                ai_summary: None,
                custom_answers: (!custom_answers.is_empty()).then_some(custom_answers),
            };

            self.commit_new_candidate(&mut board, candidate.clone())?;
            (candidate, job_title)
        };

        info!(candidate_id = %candidate.id, %job_id, "application received");

        let service = self.clone();
        let enrichment = tokio::spawn({
            let candidate = candidate.clone();
            async move { service.enrich_profile(candidate, job_title).await }
        });

        Ok(IntakeReceipt {
            candidate,
            enrichment,
        })
    }

    async fn enrich_profile(&self, candidate: Candidate, job_title: String) {
        let summary = match self
            .assistant
            .summarize_profile(&candidate, &job_title)
            .await
        {
            Ok(summary) => summary,
            Err(err) => {
                warn!(candidate_id = %candidate.id, error = %err, "profile analysis failed");
                return;
            }
        };

        let mut board = self.board.lock();
        match self.commit_candidate(&mut board, &candidate.id, |stored| {
            stored.ai_summary = Some(summary);
        }) {
            Ok(Some(_)) => info!(candidate_id = %candidate.id, "profile summary stored"),
            Ok(None) => warn!(candidate_id = %candidate.id, "candidate vanished before enrichment"),
            Err(err) => {
                warn!(candidate_id = %candidate.id, error = %err, "could not save profile summary")
            }
        }
    }

    /// Re-runs profile analysis on demand. A failed analysis stores the fixed fallback sentence.
    /// `Ok(None)` when the candidate does not exist.
    pub async fn refresh_summary(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Option<Candidate>, HiringError> {
        let (candidate, job_title) = {
            let board = self.board.lock();
            let Some(candidate) = board.candidate(candidate_id).cloned() else {
                return Ok(None);
            };
            let job_title = board.job_title_for(&candidate);
            (candidate, job_title)
        };

        let summary =
            summarize_profile_or_fallback(self.assistant.as_ref(), &candidate, &job_title).await;

        let mut board = self.board.lock();
        let updated = self.commit_candidate(&mut board, candidate_id, |stored| {
            stored.ai_summary = Some(summary);
        })?;
        Ok(updated)
    }
}
