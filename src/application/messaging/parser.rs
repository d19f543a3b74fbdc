//! Event parser - Parses raw text and callback payloads into dialog events

use crate::domain::entities::{ButtonAction, DialogEvent};

/// Decodes incoming platform input into `DialogEvent` values exactly once,
/// at the boundary; the dialog engine never sees raw strings for control
/// flow.
pub struct EventParser {
    command_prefix: String,
}

impl EventParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message into an event.
    pub fn parse_text(&self, text: &str) -> DialogEvent {
        let text = text.trim();

        if text.starts_with('/') || text.starts_with(&self.command_prefix) {
            return self.parse_command(text);
        }

        DialogEvent::Text(text.to_string())
    }

    /// Parse a command message. Arguments are joined with single spaces so
    /// multi-word city names survive `/weather New York`.
    fn parse_command(&self, text: &str) -> DialogEvent {
        let cmd_text = if let Some(stripped) = text.strip_prefix('/') {
            stripped
        } else {
            text.trim_start_matches(&self.command_prefix)
        };

        let mut parts = cmd_text.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        match name {
            "start" => DialogEvent::Start,
            "help" => DialogEvent::Help,
            "weather" => DialogEvent::Weather {
                city: args.join(" "),
            },
            _ => DialogEvent::Unknown,
        }
    }

    /// Parse a callback payload (inline button press).
    pub fn parse_callback(&self, data: &str) -> DialogEvent {
        match ButtonAction::from_payload(data) {
            Some(action) => DialogEvent::Button(action),
            None => DialogEvent::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> EventParser {
        EventParser::new("/")
    }

    #[test]
    fn parses_start_command() {
        assert_eq!(parser().parse_text("/start"), DialogEvent::Start);
    }

    #[test]
    fn parses_weather_command_with_multi_word_city() {
        assert_eq!(
            parser().parse_text("/weather New York"),
            DialogEvent::Weather {
                city: "New York".to_string()
            }
        );
    }

    #[test]
    fn weather_command_without_args_has_empty_city() {
        assert_eq!(
            parser().parse_text("/weather"),
            DialogEvent::Weather {
                city: String::new()
            }
        );
    }

    #[test]
    fn free_text_is_a_text_event() {
        assert_eq!(
            parser().parse_text("  Reykjavik "),
            DialogEvent::Text("Reykjavik".to_string())
        );
    }

    #[test]
    fn unknown_command_is_unknown() {
        assert_eq!(parser().parse_text("/frobnicate"), DialogEvent::Unknown);
    }

    #[test]
    fn callbacks_decode_to_button_events() {
        assert_eq!(
            parser().parse_callback("continue"),
            DialogEvent::Button(ButtonAction::Continue)
        );
        assert_eq!(parser().parse_callback("bogus"), DialogEvent::Unknown);
    }
}
