use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::RelayClient;
use crate::domain::{DomainError, RelayCall, RequestId, SessionState, UiMode};

/// Drives a [`SessionState`] and performs the relay calls it asks for.
///
/// `submit_message` runs the whole round trip inline. Event loops that must
/// stay responsive use `begin_message`, run [`ConversationUseCase::perform`]
/// elsewhere, and hand the outcome back through `finish_message`.
pub struct ConversationUseCase {
    client: Arc<dyn RelayClient>,
    state: SessionState,
}

impl ConversationUseCase {
    pub fn new(client: Arc<dyn RelayClient>) -> Self {
        Self {
            client,
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn client(&self) -> Arc<dyn RelayClient> {
        self.client.clone()
    }

    /// Returns `true` when the session moved to chatting.
    pub fn submit_credential(&mut self, text: &str) -> bool {
        self.state = std::mem::take(&mut self.state).submit_credential(text);
        self.state.mode() == UiMode::Chatting
    }

    pub fn reset_credential(&mut self) {
        self.state = std::mem::take(&mut self.state).reset_credential();
    }

    pub fn begin_message(&mut self, text: &str) -> Option<RelayCall> {
        let (state, call) = std::mem::take(&mut self.state).submit_message(text);
        self.state = state;
        if let Some(call) = &call {
            debug!(
                "Relay call {} queued with {} messages",
                call.id,
                call.request.messages.len()
            );
        }
        call
    }

    pub fn finish_message(&mut self, id: RequestId, outcome: Result<String, DomainError>) {
        if self.state.pending_request() != Some(id) {
            debug!("Discarding outcome of stale relay call {}", id);
        }
        self.state = std::mem::take(&mut self.state).complete_relay(id, outcome);
    }

    /// Submit a message and wait for the reply.
    ///
    /// Returns `false` when the input was rejected and no call was made.
    pub async fn submit_message(&mut self, text: &str) -> bool {
        let Some(call) = self.begin_message(text) else {
            return false;
        };
        let outcome = Self::perform(self.client.as_ref(), &call).await;
        self.finish_message(call.id, outcome);
        true
    }

    /// Execute one relay call. Failures are logged here; the session turns
    /// them into the fallback message.
    pub async fn perform(
        client: &dyn RelayClient,
        call: &RelayCall,
    ) -> Result<String, DomainError> {
        let outcome = client.relay(&call.request).await;
        if let Err(e) = &outcome {
            warn!("Relay call {} failed: {}", call.id, e);
        }
        outcome
    }
}
