//! # Domain Layer
//!
//! Conversation models, the client session state machine and the error type.
//! This layer is independent of HTTP, terminal and provider details.

pub mod error;
pub mod models;

pub use error::*;
pub use models::*;
