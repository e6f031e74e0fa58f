use crate::infra::{build_assistant, open_board};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use talent_flow::config::AppConfig;
use talent_flow::error::AppError;
use talent_flow::workflows::hiring::{
    apply_link, ApplicationForm, ApplicationStatus, ApprovalOutcome, CandidateId, Delivery,
    HiringService, JobId, LogMailer, MemoryStore, TransitionOutcome,
};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Candidate to move (demo ids c1..c4)
    #[arg(long, default_value = "c2")]
    pub(crate) candidate: String,
    /// Target status, e.g. SELECTED or "1st Interview"
    #[arg(long, default_value = "SELECTED", value_parser = parse_status)]
    pub(crate) status: ApplicationStatus,
    /// Cancel the pending change instead of approving the draft
    #[arg(long)]
    pub(crate) cancel: bool,
    /// Skip the application intake portion of the demo
    #[arg(long)]
    pub(crate) skip_application: bool,
}

#[derive(Subcommand, Debug)]
pub(crate) enum JobsCommand {
    /// List every job with its status and question count
    List {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the shareable apply link for a job
    Link {
        job_id: String,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub(crate) fn parse_status(raw: &str) -> Result<ApplicationStatus, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string()))
        .map_err(|_| format!("unknown status '{raw}'"))
}

pub(crate) fn run_jobs(command: JobsCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    match command {
        JobsCommand::List { data_dir } => {
            let service = open_board(&config, data_dir)?;
            for job in service.jobs() {
                println!(
                    "- {} | {} ({}) | {:?} | {} questions | {} candidates",
                    job.id,
                    job.title,
                    job.department,
                    job.status,
                    job.questions.len(),
                    service.candidates_for_job(&job.id).len()
                );
            }
        }
        JobsCommand::Link { job_id, data_dir } => {
            let service = open_board(&config, data_dir)?;
            match service.apply_link_for(&config.public_url(), &JobId(job_id.clone())) {
                Some(link) => println!("{link}"),
                None => println!("No job with id {job_id}"),
            }
        }
    }

    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        candidate,
        status,
        cancel,
        skip_application,
    } = args;

    let config = AppConfig::load()?;
    let service = HiringService::load(
        Arc::new(MemoryStore::default()),
        build_assistant(&config.assistant)?,
        Arc::new(LogMailer),
    )?;

    println!("TalentFlow demo");
    render_board(&service);

    let candidate_id = CandidateId(candidate);
    println!("\nRequesting {candidate_id} -> {status}");
    match service.request_status_change(&candidate_id, status).await? {
        TransitionOutcome::Committed { candidate } => {
            println!("- Committed immediately; {} is now {}", candidate.full_name, candidate.status);
        }
        TransitionOutcome::AwaitingApproval { pending } => {
            println!("- Email approval required for {}", pending.candidate_name);
            if let Some(draft) = &pending.draft {
                println!("  Subject: {}", draft.subject);
                for line in draft.body.lines() {
                    println!("  | {line}");
                }
            }

            if cancel {
                service.cancel(&candidate_id);
                println!("- Cancelled; status left unchanged");
            } else {
                match service.approve_and_send(&candidate_id, None)? {
                    ApprovalOutcome::Sent {
                        candidate,
                        email,
                        delivery,
                    } => {
                        let delivered = match delivery {
                            Delivery::Delivered => "delivered".to_string(),
                            Delivery::Failed { reason } => format!("not delivered ({reason})"),
                        };
                        println!(
                            "- Approved: {} is now {}; email to {} {}",
                            candidate.full_name, candidate.status, email.to, delivered
                        );
                    }
                    other => println!("- Nothing sent: {other:?}"),
                }
            }
        }
        TransitionOutcome::Superseded => println!("- Draft superseded by a newer request"),
        TransitionOutcome::UnknownCandidate => println!("- No candidate with id {candidate_id}"),
    }

    if !skip_application {
        let job_id = JobId("job2".to_string());
        println!(
            "\nApplication intake via {}",
            apply_link(&config.public_url(), &job_id)
        );
        let receipt = service.submit_application(
            &job_id,
            ApplicationForm {
                full_name: "Sam Rivera".to_string(),
                email: "sam@example.com".to_string(),
                phone: "555-0142".to_string(),
                experience_years: 2,
                skills: "Onboarding, Scheduling, ".to_string(),
                notes: Some("Bilingual (EN/ES).".to_string()),
                ..ApplicationForm::default()
            },
        )?;
        let new_id = receipt.candidate.id.clone();
        println!("- Received {} -> {}", new_id, receipt.candidate.status);
        if receipt.enrichment.await.is_err() {
            println!("  Profile analysis task did not finish");
        }
        let summary = service
            .candidate(&new_id)
            .and_then(|candidate| candidate.ai_summary)
            .unwrap_or_else(|| "(no summary; analysis unavailable)".to_string());
        println!("  AI summary: {summary}");
    }

    println!();
    render_board(&service);
    Ok(())
}

fn render_board(service: &HiringService) {
    let stats = service.stats(None);
    println!(
        "Board: {} candidates | {} active | {} hired | {} rejected",
        stats.total, stats.active, stats.hired, stats.rejected
    );
    for job in service.jobs() {
        let Some(columns) = service.pipeline(&job.id) else {
            continue;
        };
        println!("{} ({})", job.title, job.id);
        for column in columns {
            let names: Vec<&str> = column
                .candidates
                .iter()
                .map(|candidate| candidate.full_name.as_str())
                .collect();
            println!("  - {}: {}", column.label, names.join(", "));
        }
    }
}
