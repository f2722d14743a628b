use async_trait::async_trait;

use crate::domain::{Credential, DomainError, Message, ModelConfig};

/// A chat-completion backend reached on behalf of the relay.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. Retries, rate limits and streaming are the provider's business.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Send the transcript and return the text of the first choice, or `None`
    /// when the provider produced no choice with content.
    async fn complete(
        &self,
        transcript: &[Message],
        credential: &Credential,
        config: &ModelConfig,
    ) -> Result<Option<String>, DomainError>;

    fn name(&self) -> &str;
}
