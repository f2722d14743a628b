use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::{Message, Role, UiMode};

use super::app::ChatApp;

const TITLE: &str = "Chat Relay";
const ASSISTANT_LABEL: &str = "Assistant";
const USER_LABEL: &str = "You";
const WELCOME: &str = "How can I help you today?";
const THINKING: &str = "Thinking...";
const MASK: char = '•';

pub fn render(frame: &mut Frame, app: &ChatApp) {
    match app.session().mode() {
        UiMode::CredentialEntry => render_credential_entry(frame, app),
        UiMode::Chatting => render_chat(frame, app),
    }
}

fn render_credential_entry(frame: &mut Frame, app: &ChatApp) {
    let area = centered(frame.area(), 64, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(TITLE).bold().centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [prompt, input, hint, note] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Min(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Enter your OpenAI API key to get started").centered(),
        prompt,
    );

    let masked: String = app.credential_input().chars().map(|_| MASK).collect();
    let placeholder = masked.is_empty();
    let text = if placeholder { "sk-...".to_string() } else { masked };
    let style = if placeholder {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("API key")),
        input,
    );
    set_input_cursor(frame, input, app.credential_input().chars().count());

    frame.render_widget(
        Paragraph::new("Enter: start chatting · Esc: quit").centered().dim(),
        hint,
    );
    frame.render_widget(
        Paragraph::new("Your API key is only kept in memory and never written to disk.")
            .centered()
            .wrap(Wrap { trim: true })
            .italic(),
        note,
    );
}

fn render_chat(frame: &mut Frame, app: &ChatApp) {
    let [header, transcript, input] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    frame.render_widget(
        Line::from(vec![
            Span::from(TITLE).bold(),
            Span::from("  Ctrl+K: change API key · PgUp/PgDn: scroll · Esc: quit").dim(),
        ]),
        header,
    );

    render_transcript(frame, app, transcript);

    let pending = app.session().is_pending();
    let (text, style) = if pending {
        (
            "Waiting for reply...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else if app.message_input().is_empty() {
        (
            "Send a message...".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (app.message_input().to_string(), Style::default())
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL)),
        input,
    );
    if !pending {
        set_input_cursor(frame, input, app.message_input().width());
    }
}

fn render_transcript(frame: &mut Frame, app: &ChatApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = transcript_lines(
        app.session().messages(),
        app.session().is_pending(),
        inner.width,
    );
    let top = app.scroll().top_line(lines.len(), inner.height);
    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), inner);
}

/// Transcript as pre-wrapped lines so the scroll offset is exact.
pub fn transcript_lines(messages: &[Message], pending: bool, width: u16) -> Vec<Line<'static>> {
    if messages.is_empty() && !pending {
        return vec![Line::from(WELCOME).bold().centered()];
    }

    let mut lines = Vec::new();
    for message in messages {
        push_entry(&mut lines, message.role(), message.content(), width, false);
    }
    if pending {
        push_entry(&mut lines, Role::Assistant, THINKING, width, true);
    }
    lines
}

fn push_entry(lines: &mut Vec<Line<'static>>, role: Role, content: &str, width: u16, dim: bool) {
    let (label, color) = match role {
        Role::User => (USER_LABEL, Color::Cyan),
        Role::Assistant => (ASSISTANT_LABEL, Color::Green),
    };
    lines.push(Line::from(Span::styled(
        format!("{label}:"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )));

    let body_style = if dim {
        Style::default().add_modifier(Modifier::ITALIC | Modifier::DIM)
    } else {
        Style::default()
    };
    for row in wrap_text(content, width.max(1) as usize) {
        lines.push(Line::from(Span::styled(row, body_style)));
    }
    lines.push(Line::default());
}

/// Hard-wrap `text` into rows that fit `width` terminal columns.
///
/// A single character wider than `width` still gets a row of its own.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.lines() {
        let mut row = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(c);
            used += w;
        }
        rows.push(row);
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

fn set_input_cursor(frame: &mut Frame, input: Rect, typed: usize) {
    let max_x = input.right().saturating_sub(2);
    let x = input
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(typed).unwrap_or(u16::MAX))
        .min(max_x);
    frame.set_cursor_position((x, input.y + 1));
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}
