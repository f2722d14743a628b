//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Completion providers (OpenAI-compatible HTTP, offline mock)
//! - Relay client used by the terminal front end
//! - HTTP API (axum) and terminal UI (ratatui)

pub mod adapter;
pub mod api;
pub mod tui;

pub use adapter::*;
pub use api::{build_router, serve, Container, ContainerConfig};
