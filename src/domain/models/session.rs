//! Client-side conversation state.
//!
//! Every transition consumes the current [`SessionState`] and returns the
//! next one. Side effects are described, not performed: a submitted message
//! yields a [`RelayCall`] that the caller is expected to execute and feed
//! back through [`SessionState::complete_relay`].

use std::fmt;

use crate::domain::DomainError;

use super::{Credential, Message, RelayRequest};

/// Assistant text appended when a relay call fails for any reason.
pub const RELAY_FALLBACK_MESSAGE: &str = "Sorry, there was an error processing your request.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    CredentialEntry,
    Chatting,
}

/// Monotonic identifier tying a relay outcome to the call that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A relay call the caller must perform.
#[derive(Debug, Clone)]
pub struct RelayCall {
    pub id: RequestId,
    pub request: RelayRequest,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    mode: UiMode,
    messages: Vec<Message>,
    credential: Option<Credential>,
    pending: Option<RequestId>,
    last_request_id: u64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_request(&self) -> Option<RequestId> {
        self.pending
    }

    /// Store a non-blank credential and switch to chatting.
    pub fn submit_credential(mut self, text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return self;
        }
        self.credential = Some(Credential::new(trimmed));
        self.mode = UiMode::Chatting;
        self
    }

    /// Append a user message and describe the relay call for it.
    ///
    /// Blank input, a call already in flight, or a session that is not
    /// chatting leave the state untouched and yield no call.
    pub fn submit_message(mut self, text: &str) -> (Self, Option<RelayCall>) {
        if text.trim().is_empty() || self.pending.is_some() || self.mode != UiMode::Chatting {
            return (self, None);
        }
        let Some(credential) = self.credential.clone() else {
            return (self, None);
        };

        self.messages.push(Message::user(text));
        self.last_request_id += 1;
        let id = RequestId(self.last_request_id);
        self.pending = Some(id);

        let call = RelayCall {
            id,
            request: RelayRequest::new(self.messages.clone(), credential),
        };
        (self, Some(call))
    }

    /// Apply the outcome of relay call `id`.
    ///
    /// Outcomes for anything other than the pending call are dropped. On
    /// failure the fixed fallback text is appended instead of the error.
    pub fn complete_relay(mut self, id: RequestId, outcome: Result<String, DomainError>) -> Self {
        if self.pending != Some(id) {
            return self;
        }
        let content = outcome.unwrap_or_else(|_| RELAY_FALLBACK_MESSAGE.to_string());
        self.messages.push(Message::assistant(content));
        self.pending = None;
        self
    }

    /// Go back to credential entry. Messages and the stored key are kept.
    pub fn reset_credential(mut self) -> Self {
        self.mode = UiMode::CredentialEntry;
        self
    }
}
