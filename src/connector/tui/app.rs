use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{ConversationUseCase, RelayClient};
use crate::domain::{DomainError, RelayCall, RequestId, SessionState, UiMode};

use super::scroll::ScrollState;
use super::view;

const PAGE_LINES: u16 = 10;

type RelayOutcome = (RequestId, Result<String, DomainError>);

/// Terminal chat front end: credential screen plus transcript and input line.
pub struct ChatApp {
    conversation: ConversationUseCase,
    credential_input: String,
    message_input: String,
    scroll: ScrollState,
    should_quit: bool,
}

impl ChatApp {
    pub fn new(client: Arc<dyn RelayClient>) -> Self {
        Self {
            conversation: ConversationUseCase::new(client),
            credential_input: String::new(),
            message_input: String::new(),
            scroll: ScrollState::new(),
            should_quit: false,
        }
    }

    pub fn session(&self) -> &SessionState {
        self.conversation.state()
    }

    pub fn credential_input(&self) -> &str {
        &self.credential_input
    }

    pub fn message_input(&self) -> &str {
        &self.message_input
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the event loop until the user quits.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<RelayOutcome>();
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| view::render(frame, &self))?;

            tokio::select! {
                event = events.next() => match event {
                    Some(Ok(event)) => {
                        if let Some(call) = self.handle_event(event) {
                            self.spawn_relay(call, tx.clone());
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some((id, outcome)) = rx.recv() => self.apply_outcome(id, outcome),
            }
        }

        info!("Chat session closed");
        Ok(())
    }

    fn spawn_relay(&self, call: RelayCall, tx: mpsc::UnboundedSender<RelayOutcome>) {
        let client = self.conversation.client();
        tokio::spawn(async move {
            let outcome = ConversationUseCase::perform(client.as_ref(), &call).await;
            // The receiver is gone only when the app has already exited.
            let _ = tx.send((call.id, outcome));
        });
    }

    pub fn apply_outcome(&mut self, id: RequestId, outcome: Result<String, DomainError>) {
        self.conversation.finish_message(id, outcome);
        self.scroll.follow_bottom();
    }

    /// Update state for one terminal event. Returns the relay call to start,
    /// if the event submitted a message.
    pub fn handle_event(&mut self, event: Event) -> Option<RelayCall> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => {
                self.insert_text(&text);
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<RelayCall> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }
        if key.code == KeyCode::Esc {
            self.should_quit = true;
            return None;
        }

        match self.session().mode() {
            UiMode::CredentialEntry => {
                self.handle_credential_key(key);
                None
            }
            UiMode::Chatting => self.handle_chat_key(key),
        }
    }

    fn handle_credential_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                if self.conversation.submit_credential(&self.credential_input) {
                    debug!("Credential accepted");
                    self.credential_input.clear();
                    self.scroll.follow_bottom();
                }
            }
            KeyCode::Backspace => {
                self.credential_input.pop();
            }
            KeyCode::Char('u') if ctrl => {
                self.credential_input.clear();
            }
            KeyCode::Char(c) if !ctrl => self.credential_input.push(c),
            _ => {}
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<RelayCall> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('k') if ctrl => {
                self.conversation.reset_credential();
                self.credential_input = self
                    .session()
                    .credential()
                    .map(|c| c.expose().to_string())
                    .unwrap_or_default();
                None
            }
            KeyCode::PageUp => {
                self.scroll.scroll_up(PAGE_LINES);
                None
            }
            KeyCode::PageDown => {
                self.scroll.scroll_down(PAGE_LINES);
                None
            }
            // Input is disabled while a reply is pending.
            _ if self.session().is_pending() => None,
            KeyCode::Enter => {
                let call = self.conversation.begin_message(&self.message_input);
                if call.is_some() {
                    self.message_input.clear();
                    self.scroll.follow_bottom();
                }
                call
            }
            KeyCode::Backspace => {
                self.message_input.pop();
                None
            }
            KeyCode::Char('u') if ctrl => {
                self.message_input.clear();
                None
            }
            KeyCode::Char(c) if !ctrl => {
                self.message_input.push(c);
                None
            }
            _ => None,
        }
    }

    fn insert_text(&mut self, text: &str) {
        let text = text.replace(['\r', '\n'], " ");
        match self.session().mode() {
            UiMode::CredentialEntry => self.credential_input.push_str(text.trim()),
            UiMode::Chatting if !self.session().is_pending() => self.message_input.push_str(&text),
            UiMode::Chatting => {}
        }
    }
}
