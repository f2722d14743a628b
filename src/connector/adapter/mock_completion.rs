use async_trait::async_trait;

use crate::application::CompletionProvider;
use crate::domain::{Credential, DomainError, Message, ModelConfig};

/// Offline provider that echoes the latest user message.
pub struct MockCompletionProvider;

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        transcript: &[Message],
        _credential: &Credential,
        config: &ModelConfig,
    ) -> Result<Option<String>, DomainError> {
        Ok(transcript
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(|m| format!("[{}] You said: {}", config.model, m.content())))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn echoes_latest_user_message() {
        let provider = MockCompletionProvider::new();
        let transcript = vec![
            Message::user("first"),
            Message::assistant("ok"),
            Message::user("second"),
        ];
        let reply = provider
            .complete(&transcript, &Credential::new("k"), &ModelConfig::default())
            .await
            .unwrap();
        assert_eq!(reply.as_deref(), Some("[gpt-3.5-turbo] You said: second"));
    }

    #[tokio::test]
    async fn empty_transcript_has_no_reply() {
        let reply = MockCompletionProvider::new()
            .complete(&[], &Credential::new("k"), &ModelConfig::default())
            .await
            .unwrap();
        assert!(reply.is_none());
    }
}
