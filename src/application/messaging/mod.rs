//! Message handling - decoding raw platform input into dialog events

pub mod parser;

pub use parser::EventParser;
