use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{Credential, DomainError, RelayRequest, RelayResponse};

use super::super::Container;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Handler for `POST /api/chat`.
pub struct ChatController;

impl ChatController {
    pub async fn chat(
        State(container): State<Arc<Container>>,
        body: Bytes,
    ) -> (StatusCode, Json<RelayResponse>) {
        let request = match Self::parse_request(&body) {
            Ok(request) => request,
            Err(e) => return Self::error_response(e),
        };

        match container.relay_use_case().execute(&request).await {
            Ok(reply) => (StatusCode::OK, Json(RelayResponse::reply(reply))),
            Err(e) => Self::error_response(e),
        }
    }

    /// Decode a chat body regardless of its content type.
    ///
    /// The key is checked before the transcript is typed, so an absent or
    /// empty `apiKey` always reports the missing key. Decoding errors are
    /// logged by category only since serde messages may quote the body.
    fn parse_request(body: &[u8]) -> Result<RelayRequest, DomainError> {
        let mut value: Value = serde_json::from_slice(body).map_err(|e| {
            warn!("Rejected chat request body: {:?} error", e.classify());
            DomainError::invalid_input(INVALID_BODY_MESSAGE)
        })?;

        let api_key = match value.get("apiKey") {
            Some(Value::String(key)) if !key.is_empty() => Credential::new(key.as_str()),
            _ => return Err(DomainError::MissingCredential),
        };

        let messages = match value.get_mut("messages").map(Value::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(messages) => serde_json::from_value(messages).map_err(|e| {
                warn!("Rejected chat transcript: {:?} error", e.classify());
                DomainError::invalid_input(INVALID_BODY_MESSAGE)
            })?,
        };

        Ok(RelayRequest::new(messages, api_key))
    }

    fn error_response(err: DomainError) -> (StatusCode, Json<RelayResponse>) {
        if err.is_validation_error() {
            return (
                StatusCode::BAD_REQUEST,
                Json(RelayResponse::error(err.detail())),
            );
        }
        error!("Chat relay failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(RelayResponse::error(err.detail())),
        )
    }
}
