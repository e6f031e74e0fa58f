use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AnswerKind, FormQuestion, Job, JobId, JobStatus, QuestionId};
use super::service::{fresh_id, HiringError, HiringService};

/// Query parameter carrying the job id in shareable apply links.
pub const APPLY_QUERY_PARAM: &str = "apply";

/// Editable job attribute with its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum JobField {
    Title(String),
    Department(String),
    Description(String),
    Status(JobStatus),
}

/// Editable question attribute with its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum QuestionField {
    Text(String),
    Kind(AnswerKind),
}

/// `<public_url>?apply=<job id>`.
pub fn apply_link(public_url: &str, job_id: &JobId) -> String {
    format!(
        "{}?{APPLY_QUERY_PARAM}={}",
        public_url.trim_end_matches('/'),
        urlencoding::encode(&job_id.0)
    )
}

impl HiringService {
    /// Appends a placeholder posting for the recruiter to fill in.
    pub fn add_job(&self) -> Result<Job, HiringError> {
        let mut board = self.board.lock();
        let job = Job {
            id: board.fresh_job_id(),
            title: "New Position".to_string(),
            department: "General".to_string(),
            description: "Description of the role...".to_string(),
            status: JobStatus::Active,
            questions: Vec::new(),
        };

        let mut next = board.jobs.clone();
        next.push(job.clone());
        self.commit_jobs(&mut board, next)?;
        info!(job_id = %job.id, "job added");
        Ok(job)
    }

    /// `Ok(None)` when the job does not exist.
    pub fn update_job_field(
        &self,
        job_id: &JobId,
        field: JobField,
    ) -> Result<Option<Job>, HiringError> {
        self.edit_job(job_id, |job| match field {
            JobField::Title(title) => job.title = title,
            JobField::Department(department) => job.department = department,
            JobField::Description(description) => job.description = description,
            JobField::Status(status) => job.status = status,
        })
    }

    /// Appends a short-text question. `Ok(None)` when the job does not exist.
    pub fn add_question(&self, job_id: &JobId) -> Result<Option<Job>, HiringError> {
        let question = FormQuestion {
            id: QuestionId(fresh_id("q")),
            text: "New Question?".to_string(),
            kind: AnswerKind::Text,
        };
        self.edit_job(job_id, |job| job.questions.push(question))
    }

    /// `Ok(None)` when the job or the question does not exist.
    pub fn update_question(
        &self,
        job_id: &JobId,
        question_id: &QuestionId,
        field: QuestionField,
    ) -> Result<Option<Job>, HiringError> {
        if !self.has_question(job_id, question_id) {
            return Ok(None);
        }
        self.edit_job(job_id, |job| {
            if let Some(question) = job
                .questions
                .iter_mut()
                .find(|question| &question.id == question_id)
            {
                match field {
                    QuestionField::Text(text) => question.text = text,
                    QuestionField::Kind(kind) => question.kind = kind,
                }
            }
        })
    }

    /// Removes a question, keeping the order of the rest. `Ok(None)` when nothing matched.
    pub fn delete_question(
        &self,
        job_id: &JobId,
        question_id: &QuestionId,
    ) -> Result<Option<Job>, HiringError> {
        if !self.has_question(job_id, question_id) {
            return Ok(None);
        }
        self.edit_job(job_id, |job| {
            job.questions.retain(|question| &question.id != question_id);
        })
    }

    /// Shareable link for a job; `None` when the job does not exist.
    pub fn apply_link_for(&self, public_url: &str, job_id: &JobId) -> Option<String> {
        self.job(job_id).map(|job| apply_link(public_url, &job.id))
    }

    /// Resolves the `apply` parameter of a shared link to its job.
    pub fn job_for_apply_link(&self, apply: &str) -> Option<Job> {
        self.job(&JobId(apply.trim().to_string()))
    }

    fn has_question(&self, job_id: &JobId, question_id: &QuestionId) -> bool {
        self.board
            .lock()
            .job(job_id)
            .is_some_and(|job| job.question(question_id).is_some())
    }

    fn edit_job<F>(&self, job_id: &JobId, edit: F) -> Result<Option<Job>, HiringError>
    where
        F: FnOnce(&mut Job),
    {
        let mut board = self.board.lock();
        let Some(index) = board.jobs.iter().position(|job| &job.id == job_id) else {
            return Ok(None);
        };

        let mut next = board.jobs.clone();
        edit(&mut next[index]);
        let updated = next[index].clone();
        self.commit_jobs(&mut board, next)?;
        info!(%job_id, "job updated");
        Ok(Some(updated))
    }
}
