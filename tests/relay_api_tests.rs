//! End-to-end tests for `POST /api/chat`.
//!
//! Each test binds a relay on an ephemeral port with a scripted provider and
//! talks to it over real HTTP.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use chatrelay::domain::RELAY_FALLBACK_MESSAGE;
use chatrelay::{
    build_router, CompletionProvider, Container, ConversationUseCase, Credential, DomainError,
    HttpRelayClient, Message, MockCompletionProvider, ModelConfig,
};

enum Script {
    Reply(&'static str),
    NoChoices,
    Fail(&'static str),
}

struct ScriptedProvider {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        _transcript: &[Message],
        _credential: &Credential,
        _config: &ModelConfig,
    ) -> Result<Option<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Reply(text) => Ok(Some(text.to_string())),
            Script::NoChoices => Ok(None),
            Script::Fail(msg) => Err(DomainError::provider(msg)),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

async fn spawn_relay(provider: Arc<dyn CompletionProvider>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let container = Arc::new(Container::with_provider(provider, ModelConfig::default()));
    tokio::spawn(async move {
        axum::serve(listener, build_router(container))
            .await
            .expect("relay server");
    });
    format!("http://{addr}")
}

async fn post_chat(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&body)
        .send()
        .await
        .expect("request");
    let status = response.status().as_u16();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn empty_api_key_is_rejected() {
    let provider = ScriptedProvider::new(Script::Reply("unused"));
    let base = spawn_relay(provider.clone()).await;

    let (status, body) = post_chat(&base, json!({ "messages": [], "apiKey": "" })).await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "API key is required" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn absent_or_null_api_key_is_rejected() {
    let provider = ScriptedProvider::new(Script::Reply("unused"));
    let base = spawn_relay(provider.clone()).await;

    for body in [
        json!({ "messages": [{ "role": "user", "content": "Hi" }] }),
        json!({ "messages": [], "apiKey": null }),
    ] {
        let (status, body) = post_chat(&base, body).await;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "API key is required");
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn reply_is_returned_as_message() {
    let base = spawn_relay(ScriptedProvider::new(Script::Reply("Hello!"))).await;

    let (status, body) = post_chat(
        &base,
        json!({ "messages": [{ "role": "user", "content": "Hi" }], "apiKey": "sk-test" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Hello!" }));
}

#[tokio::test]
async fn empty_choices_yield_placeholder() {
    let base = spawn_relay(ScriptedProvider::new(Script::NoChoices)).await;

    let (status, body) = post_chat(&base, json!({ "messages": [], "apiKey": "sk-test" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "No response" }));
}

#[tokio::test]
async fn provider_failure_is_internal_error() {
    let base = spawn_relay(ScriptedProvider::new(Script::Fail("quota exceeded"))).await;

    let (status, body) = post_chat(&base, json!({ "messages": [], "apiKey": "sk-test" })).await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "quota exceeded" }));
}

#[tokio::test]
async fn provider_failure_without_message_uses_fallback() {
    let base = spawn_relay(ScriptedProvider::new(Script::Fail(""))).await;

    let (status, body) = post_chat(&base, json!({ "messages": [], "apiKey": "sk-test" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn failure_never_echoes_credential() {
    let base = spawn_relay(ScriptedProvider::new(Script::Fail(
        "Incorrect API key provided: sk-very-secret",
    )))
    .await;

    let (status, body) =
        post_chat(&base, json!({ "messages": [], "apiKey": "sk-very-secret" })).await;
    assert_eq!(status, 500);
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(!error.contains("sk-very-secret"));
}

#[tokio::test]
async fn identical_requests_are_not_cached() {
    let provider = ScriptedProvider::new(Script::Reply("same"));
    let base = spawn_relay(provider.clone()).await;
    let body = json!({ "messages": [{ "role": "user", "content": "Hi" }], "apiKey": "sk-test" });

    let first = post_chat(&base, body.clone()).await;
    let second = post_chat(&base, body).await;
    assert_eq!(first, second);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn malformed_body_is_rejected_before_provider() {
    let provider = ScriptedProvider::new(Script::Reply("unused"));
    let base = spawn_relay(provider.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Invalid request body" }));

    let (status, body) = post_chat(
        &base,
        json!({ "messages": [{ "role": "system", "content": "x" }], "apiKey": "sk-test" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid request body" }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn missing_key_is_reported_before_transcript_shape() {
    let provider = ScriptedProvider::new(Script::Reply("unused"));
    let base = spawn_relay(provider.clone()).await;

    for body in [
        json!({ "messages": [{ "role": "system", "content": "x" }], "apiKey": "" }),
        json!({ "messages": "not a list" }),
        json!({ "messages": [{ "content": "no role" }], "apiKey": null }),
    ] {
        let (status, body) = post_chat(&base, body).await;
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "API key is required" }));
    }
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let provider = ScriptedProvider::new(Script::Reply("Hello!"));
    let base = spawn_relay(provider.clone()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/api/chat"))
        .body(r#"{"messages":[],"apiKey":""}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "API key is required" }));

    let response = client
        .post(format!("{base}/api/chat"))
        .header("content-type", "text/plain")
        .body(r#"{"messages":[{"role":"user","content":"Hi"}],"apiKey":"sk-test"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Hello!" }));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn rejected_body_is_not_echoed() {
    let base = spawn_relay(ScriptedProvider::new(Script::Reply("unused"))).await;

    let (status, body) = post_chat(
        &base,
        json!({
            "messages": [{ "role": "user-sk-leaked-1234", "content": "private words" }],
            "apiKey": "sk-test"
        }),
    )
    .await;
    assert_eq!(status, 400);
    let error = body["error"].as_str().unwrap();
    assert_eq!(error, "Invalid request body");
    assert!(!error.contains("sk-leaked"));
}

#[tokio::test]
async fn terminal_session_round_trip_over_http() {
    let base = spawn_relay(Arc::new(MockCompletionProvider::new())).await;
    let mut conversation = ConversationUseCase::new(Arc::new(HttpRelayClient::new(base)));

    assert!(conversation.submit_credential("sk-test"));
    assert!(conversation.submit_message("ping").await);
    assert!(conversation.submit_message("pong").await);

    let messages = conversation.state().messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1].content(), "[gpt-3.5-turbo] You said: ping");
    assert_eq!(messages[3].content(), "[gpt-3.5-turbo] You said: pong");
    assert!(!conversation.state().is_pending());
}

#[tokio::test]
async fn relay_error_becomes_fallback_message() {
    let base = spawn_relay(ScriptedProvider::new(Script::Fail("boom"))).await;
    let mut conversation = ConversationUseCase::new(Arc::new(HttpRelayClient::new(base)));

    conversation.submit_credential("sk-test");
    assert!(conversation.submit_message("Hi").await);

    let messages = conversation.state().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].content(), RELAY_FALLBACK_MESSAGE);
    assert!(!conversation.state().is_pending());
}
