/// Inline button actions, decoded once from their wire payloads at the
/// platform boundary so the dialog engine can match on them exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// The Start button on the welcome message.
    Begin,
    /// The Continue button under a weather report.
    Continue,
    /// The Done button under a weather report.
    Done,
    /// The Start button on a failed-lookup reply; restarts the dialog.
    Restart,
}

impl ButtonAction {
    /// Decode a callback payload. Unknown payloads return `None`; the
    /// caller treats them as a restart intent.
    pub fn from_payload(data: &str) -> Option<Self> {
        match data {
            "begin" => Some(ButtonAction::Begin),
            "continue" => Some(ButtonAction::Continue),
            "done" => Some(ButtonAction::Done),
            "start" => Some(ButtonAction::Restart),
            _ => None,
        }
    }

    /// Wire payload carried in the inline keyboard callback data.
    pub fn payload(&self) -> &'static str {
        match self {
            ButtonAction::Begin => "begin",
            ButtonAction::Continue => "continue",
            ButtonAction::Done => "done",
            ButtonAction::Restart => "start",
        }
    }
}

/// A single inbound event fed to the dialog engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    /// The `/start` command.
    Start,
    /// The `/help` command.
    Help,
    /// The `/weather <city...>` command; args already joined with spaces.
    Weather { city: String },
    /// Free-text message. Interpreted as a city name only while the
    /// session is awaiting one; otherwise as an implicit restart.
    Text(String),
    /// An inline button press.
    Button(ButtonAction),
    /// Unrecognized command or callback payload.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_round_trip() {
        for action in [
            ButtonAction::Begin,
            ButtonAction::Continue,
            ButtonAction::Done,
            ButtonAction::Restart,
        ] {
            assert_eq!(ButtonAction::from_payload(action.payload()), Some(action));
        }
    }

    #[test]
    fn unknown_payload_is_none() {
        assert_eq!(ButtonAction::from_payload("refresh"), None);
        assert_eq!(ButtonAction::from_payload(""), None);
    }
}
