use async_trait::async_trait;

use crate::application::RelayClient;
use crate::domain::{DomainError, RelayRequest, RelayResponse};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";
const CHAT_PATH: &str = "/api/chat";

/// Calls a running relay server's `POST /api/chat`.
pub struct HttpRelayClient {
    client: reqwest::Client,
    url: String,
}

impl HttpRelayClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        let base: String = server_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_PATH);
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn relay(&self, request: &RelayRequest) -> Result<String, DomainError> {
        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("relay unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::transport(format!("relay returned {status}")));
        }

        match response.json::<RelayResponse>().await {
            Ok(RelayResponse::Reply { message }) => Ok(message),
            Ok(RelayResponse::Error { error }) => Err(DomainError::provider(error)),
            Err(e) => Err(DomainError::malformed(format!("unexpected relay payload: {e}"))),
        }
    }
}
