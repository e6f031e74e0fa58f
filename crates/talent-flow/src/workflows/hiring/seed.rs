use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{
    AnswerKind, ApplicationStatus, Candidate, CandidateId, FormQuestion, Job, JobId, JobStatus,
    QuestionId,
};

/// Collections used when nothing has been saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seed {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
}

impl Seed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Two open positions and four applicants spread across the board.
    pub fn demo() -> Self {
        Self {
            jobs: vec![
                Job {
                    id: JobId("job1".to_string()),
                    title: "Frontend Engineer".to_string(),
                    department: "Engineering".to_string(),
                    description: "We are looking for a React expert to join our core team."
                        .to_string(),
                    status: JobStatus::Active,
                    questions: vec![
                        question("q1", "Link to your GitHub profile?", AnswerKind::Text),
                        question(
                            "q2",
                            "Describe your experience with Tailwind CSS.",
                            AnswerKind::LongText,
                        ),
                    ],
                },
                Job {
                    id: JobId("job2".to_string()),
                    title: "HR Assistant".to_string(),
                    department: "People Ops".to_string(),
                    description: "Assist with daily HR operations and candidate screening."
                        .to_string(),
                    status: JobStatus::Active,
                    questions: vec![
                        question(
                            "q3",
                            "Are you familiar with local labor laws?",
                            AnswerKind::YesNo,
                        ),
                        question(
                            "q4",
                            "How do you handle confidential information?",
                            AnswerKind::LongText,
                        ),
                    ],
                },
            ],
            candidates: vec![
                Candidate {
                    notes: Some("Strong portfolio, good communication skills.".to_string()),
                    custom_answers: Some(answers(&[
                        ("q1", "github.com/alice"),
                        ("q2", "I use it daily."),
                    ])),
                    ..candidate(
                        "c1",
                        "job1",
                        ("Alice Johnson", "alice@example.com", "555-0101"),
                        5,
                        &["React", "TypeScript", "Tailwind"],
                        ApplicationStatus::Screening,
                        (2023, 10, 25),
                    )
                },
                candidate(
                    "c2",
                    "job1",
                    ("Bob Smith", "bob@example.com", "555-0102"),
                    3,
                    &["Node.js", "PostgreSQL", "Docker"],
                    ApplicationStatus::New,
                    (2023, 10, 26),
                ),
                Candidate {
                    ai_summary: Some("Experienced PM with a background in SaaS.".to_string()),
                    ..candidate(
                        "c3",
                        "job1",
                        ("Charlie Davis", "charlie@example.com", "555-0103"),
                        7,
                        &["Agile", "Jira", "Roadmapping"],
                        ApplicationStatus::FirstInterview,
                        (2023, 10, 20),
                    )
                },
                Candidate {
                    custom_answers: Some(answers(&[
                        ("q3", "Yes"),
                        ("q4", "Strict confidentiality is my priority."),
                    ])),
                    ..candidate(
                        "c4",
                        "job2",
                        ("Dana Lee", "dana@example.com", "555-0104"),
                        4,
                        &["Communication", "Scheduling", "Office Suite"],
                        ApplicationStatus::New,
                        (2023, 10, 27),
                    )
                },
            ],
        }
    }
}

fn question(id: &str, text: &str, kind: AnswerKind) -> FormQuestion {
    FormQuestion {
        id: QuestionId(id.to_string()),
        text: text.to_string(),
        kind,
    }
}

fn answers(pairs: &[(&str, &str)]) -> BTreeMap<QuestionId, String> {
    pairs
        .iter()
        .map(|(id, answer)| (QuestionId((*id).to_string()), (*answer).to_string()))
        .collect()
}

fn candidate(
    id: &str,
    job_id: &str,
    (full_name, email, phone): (&str, &str, &str),
    experience_years: u32,
    skills: &[&str],
    status: ApplicationStatus,
    (year, month, day): (i32, u32, u32),
) -> Candidate {
    Candidate {
        id: CandidateId(id.to_string()),
        job_id: JobId(job_id.to_string()),
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        experience_years,
        skills: skills.iter().map(|skill| (*skill).to_string()).collect(),
        status,
        applied_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        notes: None,
        ai_summary: None,
        custom_answers: None,
    }
}
