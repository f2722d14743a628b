//! Terminal front end for a running relay server.

mod app;
mod scroll;
mod view;

use std::io::stdout;
use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::application::RelayClient;

pub use app::ChatApp;
pub use scroll::ScrollState;

/// Take over the terminal and run the chat UI until the user quits.
pub async fn run(client: Arc<dyn RelayClient>) -> Result<()> {
    let mut terminal = ratatui::init();
    execute!(stdout(), EnableBracketedPaste)?;

    let result = ChatApp::new(client).run(&mut terminal).await;

    let _ = execute!(stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}
