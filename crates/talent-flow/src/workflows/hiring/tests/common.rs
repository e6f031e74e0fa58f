use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::response::Response;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;

use crate::workflows::hiring::assistant::{AssistantError, DisabledAssistant, DraftingAssistant};
use crate::workflows::hiring::domain::{
    ApplicationForm, ApplicationStatus, Candidate, CandidateId, EmailDraft, JobId, QuestionId,
};
use crate::workflows::hiring::mailer::{MailError, OutboundEmail, OutboundMailer};
use crate::workflows::hiring::router::{hiring_router, HiringApi};
use crate::workflows::hiring::seed::Seed;
use crate::workflows::hiring::service::HiringService;
use crate::workflows::hiring::store::{KeyValueStore, MemoryStore, StoreError};

pub(super) const PASSWORD: &str = "letmein";
pub(super) const PUBLIC_URL: &str = "https://careers.example.com";

pub(super) fn id(raw: &str) -> CandidateId {
    CandidateId(raw.to_string())
}

pub(super) fn job(raw: &str) -> JobId {
    JobId(raw.to_string())
}

/// Answers every request with a predictable draft and summary.
#[derive(Debug, Default)]
pub(super) struct ScriptedAssistant {
    drafts: AtomicUsize,
    summaries: AtomicUsize,
}

impl ScriptedAssistant {
    pub(super) fn drafts_requested(&self) -> usize {
        self.drafts.load(Ordering::SeqCst)
    }

    pub(super) fn summaries_requested(&self) -> usize {
        self.summaries.load(Ordering::SeqCst)
    }
}

pub(super) fn scripted_draft(candidate: &Candidate, target: ApplicationStatus) -> EmailDraft {
    EmailDraft {
        subject: format!("{target}: {}", candidate.full_name),
        body: format!("Hello {}, you are now at {target}.", candidate.full_name),
    }
}

pub(super) fn scripted_summary(candidate: &Candidate, job_title: &str) -> String {
    format!("{} fits {job_title}.", candidate.full_name)
}

#[async_trait]
impl DraftingAssistant for ScriptedAssistant {
    async fn draft_status_email(
        &self,
        candidate: &Candidate,
        target: ApplicationStatus,
        _job_title: &str,
    ) -> Result<EmailDraft, AssistantError> {
        self.drafts.fetch_add(1, Ordering::SeqCst);
        Ok(scripted_draft(candidate, target))
    }

    async fn summarize_profile(
        &self,
        candidate: &Candidate,
        job_title: &str,
    ) -> Result<String, AssistantError> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        Ok(scripted_summary(candidate, job_title))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Holds every draft until the test releases it.
#[derive(Debug, Default)]
pub(super) struct GatedAssistant {
    gate: Notify,
}

impl GatedAssistant {
    pub(super) fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl DraftingAssistant for GatedAssistant {
    async fn draft_status_email(
        &self,
        candidate: &Candidate,
        target: ApplicationStatus,
        _job_title: &str,
    ) -> Result<EmailDraft, AssistantError> {
        self.gate.notified().await;
        Ok(scripted_draft(candidate, target))
    }

    async fn summarize_profile(
        &self,
        _candidate: &Candidate,
        _job_title: &str,
    ) -> Result<String, AssistantError> {
        Err(AssistantError::EmptyContent)
    }

    fn name(&self) -> &str {
        "gated"
    }
}

#[derive(Debug, Default)]
pub(super) struct MemoryMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl MemoryMailer {
    pub(super) fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().clone()
    }
}

impl OutboundMailer for MemoryMailer {
    fn deliver(&self, email: &OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().push(email.clone());
        Ok(())
    }
}

pub(super) struct DownMailer;

impl OutboundMailer for DownMailer {
    fn deliver(&self, _email: &OutboundEmail) -> Result<(), MailError> {
        Err(MailError::Transport("relay offline".to_string()))
    }
}

/// Memory store whose writes can be switched off mid-test.
#[derive(Debug, Default)]
pub(super) struct FlakyStore {
    inner: MemoryStore,
    failing: AtomicBool,
}

impl FlakyStore {
    pub(super) fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(super) fn stored_candidates(&self) -> Vec<Candidate> {
        let bytes = self
            .inner
            .get("candidates")
            .expect("memory read")
            .expect("candidates saved");
        serde_json::from_slice(&bytes).expect("valid candidates")
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("disk full".to_string()));
        }
        self.inner.put(key, value)
    }
}

pub(super) struct Board<A> {
    pub(super) service: HiringService,
    pub(super) store: Arc<FlakyStore>,
    pub(super) assistant: Arc<A>,
    pub(super) mailer: Arc<MemoryMailer>,
}

pub(super) fn board_with<A>(assistant: A) -> Board<A>
where
    A: DraftingAssistant + 'static,
{
    let store = Arc::new(FlakyStore::default());
    let assistant = Arc::new(assistant);
    let mailer = Arc::new(MemoryMailer::default());
    let service = HiringService::with_seed(
        store.clone(),
        assistant.clone(),
        mailer.clone(),
        Seed::demo(),
    )
    .expect("demo board loads");

    Board {
        service,
        store,
        assistant,
        mailer,
    }
}

pub(super) fn scripted_board() -> Board<ScriptedAssistant> {
    board_with(ScriptedAssistant::default())
}

pub(super) fn offline_board() -> Board<DisabledAssistant> {
    board_with(DisabledAssistant)
}

pub(super) fn application_form() -> ApplicationForm {
    let mut custom_answers = BTreeMap::new();
    custom_answers.insert(
        QuestionId("q1".to_string()),
        "github.com/erin".to_string(),
    );

    ApplicationForm {
        full_name: "Erin Park".to_string(),
        email: "erin@example.com".to_string(),
        phone: "555-0199".to_string(),
        experience_years: 4,
        skills: "React, , Go".to_string(),
        notes: Some("Available from March.".to_string()),
        custom_answers,
    }
}

pub(super) fn api_for(service: HiringService) -> HiringApi {
    HiringApi {
        service,
        public_url: PUBLIC_URL.to_string(),
        recruiter_password: PASSWORD.to_string(),
    }
}

pub(super) fn router_for(service: HiringService) -> axum::Router {
    hiring_router(api_for(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Lets spawned tasks run until `ready` holds.
pub(super) async fn wait_until(mut ready: impl FnMut() -> bool) {
    for _ in 0..1_000 {
        if ready() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition never became true");
}
