//! nimbus-bot - a conversational Telegram weather bot
//!
//! A short dialog obtains a city name from the user and replies with
//! formatted current-weather data from OpenWeather. The dialog state
//! machine and the query/formatting pipeline live in the application
//! layer; platform transport is an adapter behind the `Bot` trait.

pub mod application;
pub mod domain;
pub mod infrastructure;
