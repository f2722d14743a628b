use serde::{Deserialize, Serialize};

use super::{Credential, Message};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Reply text used when the provider returns no usable choice.
pub const NO_RESPONSE: &str = "No response";

/// Body of `POST /api/chat`.
///
/// Both fields default when absent so that validation, not deserialization,
/// decides how a missing key is reported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub messages: Vec<Message>,

    #[serde(rename = "apiKey", default)]
    pub api_key: Credential,
}

impl RelayRequest {
    pub fn new(messages: Vec<Message>, api_key: Credential) -> Self {
        Self { messages, api_key }
    }
}

/// Response of `POST /api/chat`: a reply or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelayResponse {
    Reply { message: String },
    Error { error: String },
}

impl RelayResponse {
    pub fn reply(message: impl Into<String>) -> Self {
        Self::Reply {
            message: message.into(),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self::Error {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Fixed generation parameters sent with every provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Defaults, with the model identifier taken from `OPENAI_MODEL` when set.
    pub fn from_env() -> Self {
        match std::env::var("OPENAI_MODEL") {
            Ok(model) if !model.trim().is_empty() => Self::default().with_model(model.trim()),
            _ => Self::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}
