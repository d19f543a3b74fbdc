//! Domain entities - Core business objects with no external dependencies

pub mod event;
pub mod session;
pub mod user;
pub mod weather;

pub use event::{ButtonAction, DialogEvent};
pub use session::{DialogState, Session};
pub use user::User;
pub use weather::{to_celsius_and_fahrenheit, WeatherLookup, WeatherReport};
