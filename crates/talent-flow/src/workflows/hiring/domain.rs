use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

/// Identifier wrapper for a job's custom form questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

macro_rules! display_id {
    ($($id:ty),*) => {
        $(impl fmt::Display for $id {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        })*
    };
}

display_id!(JobId, CandidateId, QuestionId);

/// Open position with its ordered application questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub department: String,
    pub description: String,
    pub status: JobStatus,
    pub questions: Vec<FormQuestion>,
}

impl Job {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }

    pub fn question(&self, id: &QuestionId) -> Option<&FormQuestion> {
        self.questions.iter().find(|question| &question.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Active,
    Closed,
}

/// Custom question owned by a job; display order is storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: AnswerKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerKind {
    Text,
    LongText,
    YesNo,
}

/// Applicant tracked on the pipeline board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub job_id: JobId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub experience_years: u32,
    pub skills: Vec<String>,
    pub status: ApplicationStatus,
    pub applied_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_answers: Option<BTreeMap<QuestionId, String>>,
}

/// Pipeline stage. Serialized with the board's display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[serde(rename = "New Application", alias = "NEW")]
    New,
    #[serde(rename = "Screening", alias = "SCREENING")]
    Screening,
    #[serde(rename = "1st Interview", alias = "INTERVIEW_1")]
    FirstInterview,
    #[serde(rename = "Selected", alias = "SELECTED")]
    Selected,
    #[serde(rename = "Rejected", alias = "REJECTED")]
    Rejected,
}

impl ApplicationStatus {
    /// Board column order.
    pub const ALL: [ApplicationStatus; 5] = [
        ApplicationStatus::New,
        ApplicationStatus::Screening,
        ApplicationStatus::FirstInterview,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "New Application",
            ApplicationStatus::Screening => "Screening",
            ApplicationStatus::FirstInterview => "1st Interview",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    pub const fn column_label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "New Applications",
            ApplicationStatus::Screening => "Screening",
            ApplicationStatus::FirstInterview => "1st Interview",
            ApplicationStatus::Selected => "Selected",
            ApplicationStatus::Rejected => "Rejected",
        }
    }

    /// Still moving through the pipeline (neither hired nor turned down).
    pub const fn is_open(self) -> bool {
        !matches!(self, ApplicationStatus::Selected | ApplicationStatus::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Subject and body of a status email, editable until it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

/// Fields an applicant fills in on the public form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub experience_years: u32,
    /// Comma separated, as typed.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub custom_answers: BTreeMap<QuestionId, String>,
}

/// Splits a comma separated skills field into trimmed, non-empty, distinct tags.
pub fn parse_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if !skills.iter().any(|existing| existing == token) {
            skills.push(token.to_string());
        }
    }
    skills
}
