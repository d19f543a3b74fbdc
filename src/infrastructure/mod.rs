//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: Configuration loading
//! - Weather: the OpenWeather provider client
//! - Session: Per-user dialog state storage
//! - Adapters: Platform integrations (Telegram, console)

pub mod adapters;
pub mod config;
pub mod session;
pub mod weather;
