use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionProvider;
use crate::domain::{Credential, DomainError, Message, ModelConfig};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
    max_tokens: u32,
}

/// Minimal subset of the chat-completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

/// HTTP client for the OpenAI chat-completions API (and compatible servers).
///
/// Holds no credential of its own: the caller's key is attached as a bearer
/// token on each request. Override the endpoint with `OPENAI_BASE_URL`:
///
/// ```text
/// OPENAI_BASE_URL=http://localhost:1234
/// ```
pub struct OpenAiClient {
    client: reqwest::Client,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(Self::configured_base_url())
    }

    /// Return the configured base URL (for logging purposes).
    pub fn configured_base_url() -> String {
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Pull the provider's own message out of an error body, if it has one.
    fn error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|b| b.error.message)
            .filter(|m| !m.trim().is_empty())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        transcript: &[Message],
        credential: &Credential,
        config: &ModelConfig,
    ) -> Result<Option<String>, DomainError> {
        let request = ApiRequest {
            model: &config.model,
            messages: transcript,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(credential.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}");
            debug!("OpenAiClient: error body: {}", credential.redact(&body));
            return Err(DomainError::provider(
                Self::error_message(&body)
                    .unwrap_or_else(|| format!("provider returned {status}")),
            ));
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| DomainError::malformed(format!("failed to parse response: {e}")))?;

        Ok(api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content))
    }

    fn name(&self) -> &str {
        "openai"
    }
}
