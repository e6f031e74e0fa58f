use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::prompts::{profile_summary_prompt, status_email_prompt};
use super::{AssistantError, DraftingAssistant};
use crate::config::AssistantConfig;
use crate::workflows::hiring::domain::{ApplicationStatus, Candidate, EmailDraft};

/// Drafts through the Gemini `generateContent` endpoint. One attempt per call.
#[derive(Clone)]
pub struct GeminiAssistant {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<Value>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GeminiAssistant {
    /// Fails with [`AssistantError::NotConfigured`] when the config carries no API key.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = config.api_key.clone().ok_or(AssistantError::NotConfigured)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn generate(
        &self,
        prompt: &str,
        generation_config: Option<Value>,
    ) -> Result<String, AssistantError> {
        let request = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
            generation_config,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or(body);
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        let text = response_text(body)?;
        debug!(model = %self.model, chars = text.len(), "generation succeeded");
        Ok(text)
    }
}

fn email_generation_config() -> Value {
    json!({
        "responseMimeType": "application/json",
        "responseSchema": {
            "type": "OBJECT",
            "properties": {
                "subject": { "type": "STRING" },
                "body": { "type": "STRING" }
            },
            "required": ["subject", "body"]
        }
    })
}

fn response_text(response: GenerateResponse) -> Result<String, AssistantError> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err(AssistantError::EmptyContent)
    } else {
        Ok(text)
    }
}

/// Stored as the summary when the model answers without any text.
const EMPTY_ANALYSIS: &str = "Analysis failed.";

fn profile_summary(generated: Result<String, AssistantError>) -> Result<String, AssistantError> {
    match generated {
        Ok(text) => Ok(text.trim().to_string()),
        Err(AssistantError::EmptyContent) => Ok(EMPTY_ANALYSIS.to_string()),
        Err(error) => Err(error),
    }
}

fn parse_email_draft(text: &str) -> Result<EmailDraft, AssistantError> {
    let draft: EmailDraft = serde_json::from_str(text.trim())?;
    if draft.subject.trim().is_empty() || draft.body.trim().is_empty() {
        return Err(AssistantError::EmptyContent);
    }
    Ok(draft)
}

#[async_trait]
impl DraftingAssistant for GeminiAssistant {
    async fn draft_status_email(
        &self,
        candidate: &Candidate,
        target: ApplicationStatus,
        job_title: &str,
    ) -> Result<EmailDraft, AssistantError> {
        let prompt = status_email_prompt(candidate, target, job_title);
        let text = self
            .generate(&prompt, Some(email_generation_config()))
            .await?;
        parse_email_draft(&text)
    }

    async fn summarize_profile(
        &self,
        candidate: &Candidate,
        job_title: &str,
    ) -> Result<String, AssistantError> {
        let prompt = profile_summary_prompt(candidate, job_title);
        profile_summary(self.generate(&prompt, None).await)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
