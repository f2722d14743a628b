use async_trait::async_trait;

use crate::domain::{DomainError, RelayRequest};

/// Client-side access to the relay endpoint.
#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Forward the transcript and credential; return the reply text.
    ///
    /// Transport failures, non-success statuses and payloads without a reply
    /// are all errors.
    async fn relay(&self, request: &RelayRequest) -> Result<String, DomainError>;
}
