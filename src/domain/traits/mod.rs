//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod store;
pub mod weather;

pub use bot::{Bot, BotInfo, KeyboardButton};
pub use store::SessionStore;
pub use weather::WeatherProvider;
