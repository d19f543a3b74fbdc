//! Domain layer - Core dialog and weather types with no external dependencies
//!
//! This layer contains:
//! - Entities: Core business objects (Session, DialogEvent, WeatherReport, User)
//! - Traits: Abstractions for infrastructure (Bot, SessionStore, WeatherProvider)

pub mod entities;
pub mod traits;
