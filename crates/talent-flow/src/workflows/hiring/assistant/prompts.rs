use crate::workflows::hiring::domain::{ApplicationStatus, Candidate};

fn status_goal(target: ApplicationStatus, job_title: &str) -> String {
    match target {
        ApplicationStatus::FirstInterview => format!(
            "invite them to a first round interview for the {job_title} role. Be professional, \
             welcoming, and ask for their availability for the coming week."
        ),
        ApplicationStatus::Rejected => format!(
            "politely reject their application for {job_title}. Thank them for their time, \
             mention we were impressed but chose another candidate, and wish them luck."
        ),
        ApplicationStatus::Selected => format!(
            "inform them they have been selected for the {job_title} position and we are \
             preparing the offer letter."
        ),
        ApplicationStatus::New | ApplicationStatus::Screening => {
            "update them on their application status.".to_string()
        }
    }
}

pub fn status_email_prompt(
    candidate: &Candidate,
    target: ApplicationStatus,
    job_title: &str,
) -> String {
    format!(
        "Write an email to a candidate named {name} applying for the {job_title} position.\n\
         The goal is to {goal}\n\
         Keep the tone professional yet human.\n\
         Return the result in JSON format with 'subject' and 'body' fields.",
        name = candidate.full_name,
        goal = status_goal(target, job_title),
    )
}

pub fn profile_summary_prompt(candidate: &Candidate, job_title: &str) -> String {
    let answers = candidate
        .custom_answers
        .as_ref()
        .and_then(|answers| serde_json::to_string(answers).ok())
        .unwrap_or_else(|| "{}".to_string());

    format!(
        "Analyze this candidate for a {job_title} role.\n\
         Skills: {skills}.\n\
         Experience: {years} years.\n\
         Custom Answers: {answers}.\n\
         Provide a 1-sentence summary of their fit.",
        skills = candidate.skills.join(", "),
        years = candidate.experience_years,
    )
}
