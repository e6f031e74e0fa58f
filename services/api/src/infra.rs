use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_flow::config::{AppConfig, AssistantConfig};
use talent_flow::error::AppError;
use talent_flow::workflows::hiring::{
    DisabledAssistant, DraftingAssistant, FileStore, GeminiAssistant, HiringApi, HiringService,
    LogMailer,
};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Gemini when a key is configured, otherwise the disabled assistant whose calls all fall back.
pub(crate) fn build_assistant(
    config: &AssistantConfig,
) -> Result<Arc<dyn DraftingAssistant>, AppError> {
    if !config.enabled() {
        warn!("GEMINI_API_KEY not set; drafts and summaries will use fallbacks");
        return Ok(Arc::new(DisabledAssistant));
    }

    let assistant = GeminiAssistant::from_config(config)?;
    info!(model = %config.model, "gemini assistant configured");
    Ok(Arc::new(assistant))
}

/// Opens the file-backed board under `data_dir`, or the configured directory.
pub(crate) fn open_board(
    config: &AppConfig,
    data_dir: Option<PathBuf>,
) -> Result<HiringService, AppError> {
    let data_dir = data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
    let store = FileStore::open(data_dir)?;
    info!(data_dir = %store.root().display(), "opening hiring board");

    let service = HiringService::load(
        Arc::new(store),
        build_assistant(&config.assistant)?,
        Arc::new(LogMailer),
    )?;
    Ok(service)
}

pub(crate) fn hiring_api(config: &AppConfig, service: HiringService) -> HiringApi {
    HiringApi {
        service,
        public_url: config.public_url(),
        recruiter_password: config.portal.recruiter_password.clone(),
    }
}
