use std::fmt;

/// Position of a chat within the weather dialog.
///
/// The state is the only memory carried between updates: there is no
/// history and no partial-input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    /// No conversation in progress; `/start` or the Start button begin one.
    #[default]
    Idle,
    /// The next free-text message is treated as a city name.
    AwaitingCity,
    /// A report was just shown; Continue or Done are expected.
    ResultShown,
}

impl DialogState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogState::Idle => "idle",
            DialogState::AwaitingCity => "awaiting-city",
            DialogState::ResultShown => "result-shown",
        }
    }
}

impl fmt::Display for DialogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user session: exactly one dialog state per user id at any time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub state: DialogState,
}

impl Session {
    /// A fresh session starts idle.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            state: DialogState::Idle,
        }
    }

    pub fn with_state(mut self, state: DialogState) -> Self {
        self.state = state;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let session = Session::new("42");
        assert_eq!(session.state, DialogState::Idle);
        assert_eq!(session.user_id, "42");
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(DialogState::default(), DialogState::Idle);
    }
}
