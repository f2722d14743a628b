use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::application::CompletionProvider;
use crate::domain::{DomainError, ModelConfig, RelayRequest, NO_RESPONSE};

/// Server side of `POST /api/chat`: validate, call the provider once, extract
/// the reply.
///
/// Stateless: two identical requests produce two independent provider calls.
pub struct RelayChatUseCase {
    provider: Arc<dyn CompletionProvider>,
    config: ModelConfig,
}

impl RelayChatUseCase {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: ModelConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub async fn execute(&self, request: &RelayRequest) -> Result<String, DomainError> {
        if request.api_key.is_empty() {
            return Err(DomainError::MissingCredential);
        }

        info!(
            "Relaying {} messages to {} (model={})",
            request.messages.len(),
            self.provider.name(),
            self.config.model
        );
        let start_time = Instant::now();

        let reply = self
            .provider
            .complete(&request.messages, &request.api_key, &self.config)
            .await
            .map_err(|e| scrub(e, |text| request.api_key.redact(text)))?;

        debug!(
            "Provider answered in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(reply
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}

/// Rewrite the message of `err` so it cannot carry the caller's credential.
fn scrub(err: DomainError, redact: impl Fn(&str) -> String) -> DomainError {
    match err {
        DomainError::InvalidInput(msg) => DomainError::InvalidInput(redact(&msg)),
        DomainError::Provider(msg) => DomainError::Provider(redact(&msg)),
        DomainError::Transport(msg) => DomainError::Transport(redact(&msg)),
        DomainError::MalformedResponse(msg) => DomainError::MalformedResponse(redact(&msg)),
        DomainError::Internal(msg) => DomainError::Internal(redact(&msg)),
        DomainError::MissingCredential => DomainError::MissingCredential,
    }
}
