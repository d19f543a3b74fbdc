//! Application layer - Use cases and business logic
//!
//! This layer contains:
//! - Dialog: the finite-state controller for the conversation
//! - Dispatch: one-event delivery shared by the platform run loops
//! - Report: weather report rendering
//! - Messaging: decoding raw platform input into dialog events
//! - Errors: domain-specific errors

pub mod dialog;
pub mod dispatch;
pub mod errors;
pub mod messaging;
pub mod report;
