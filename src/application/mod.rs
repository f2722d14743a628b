//! # Application Layer
//!
//! Use cases coordinating the domain state with provider and relay clients.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
