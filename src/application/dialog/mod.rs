//! Dialog engine - the finite-state controller of the conversation
//!
//! Maps (state, event) to (reply, next state). The machine is shallow on
//! purpose: three states cover the whole domain, and every unrecognized
//! input falls back to an implicit restart so a session can never reach a
//! state with zero legal transitions.

use std::sync::Arc;

use crate::application::errors::BotError;
use crate::application::report;
use crate::domain::entities::{
    ButtonAction, DialogEvent, DialogState, Session, User, WeatherLookup,
};
use crate::domain::traits::{KeyboardButton, WeatherProvider};

const HELP_TEXT: &str = "\
- /start: start a new conversation\n\
- /weather <city>: current weather for a city\n\
- /help: show this message";

const PROMPT_TEXT: &str = "Please type the name of the city";

const NOT_FOUND_TEXT: &str = "This city does not exist.";

const NOT_FOUND_RETRY_TEXT: &str = "\
This city does not exist or was mistyped.\n\
To try again, press the Start button.";

const GOODBYE_TEXT: &str = "Thank you for using this bot.";

/// A single outbound reply; `buttons` is empty for plain messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub buttons: Vec<Vec<KeyboardButton>>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            buttons: Vec::new(),
        }
    }

    pub fn with_buttons(mut self, buttons: Vec<Vec<KeyboardButton>>) -> Self {
        self.buttons = buttons;
        self
    }
}

/// The engine's verdict for one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub reply: Reply,
    pub next: DialogState,
}

/// Where a city query came from; failures recover differently per source.
enum QuerySource {
    /// `/weather <city>` command: failure acknowledges and returns to idle.
    Command,
    /// Free text while awaiting a city: failure re-prompts with a restart
    /// button and keeps waiting.
    Prompt,
}

/// The finite-state controller. Holds the weather provider behind its
/// trait seam; everything else it produces is a pure function of the
/// (state, event) pair.
pub struct DialogEngine {
    provider: Arc<dyn WeatherProvider>,
    bot_name: String,
}

impl DialogEngine {
    pub fn new(provider: Arc<dyn WeatherProvider>, bot_name: impl Into<String>) -> Self {
        Self {
            provider,
            bot_name: bot_name.into(),
        }
    }

    /// Handle one inbound event against the session's current state.
    ///
    /// Only the weather pipeline can fail; every other transition is
    /// total. Transport errors propagate to the caller instead of being
    /// masked as a missing city.
    pub async fn handle(
        &self,
        session: &Session,
        event: DialogEvent,
        sender: Option<&User>,
    ) -> Result<Outcome, BotError> {
        match (session.state, event) {
            (state, DialogEvent::Help) => Ok(Outcome {
                reply: Reply::text(HELP_TEXT),
                next: state,
            }),

            // `/weather <city>` works from any state.
            (_, DialogEvent::Weather { city }) => self.lookup(&city, QuerySource::Command).await,

            (DialogState::Idle, DialogEvent::Start) => Ok(self.welcome(sender)),

            (DialogState::Idle, DialogEvent::Button(ButtonAction::Begin)) => Ok(prompt_for_city()),

            (DialogState::AwaitingCity, DialogEvent::Text(city)) => {
                self.lookup(&city, QuerySource::Prompt).await
            }

            (DialogState::ResultShown, DialogEvent::Button(ButtonAction::Continue)) => {
                Ok(prompt_for_city())
            }

            (DialogState::ResultShown, DialogEvent::Button(ButtonAction::Done)) => Ok(Outcome {
                reply: Reply::text(GOODBYE_TEXT),
                next: DialogState::Idle,
            }),

            // Anything else, including stale button presses, restarts the
            // conversation: the liveness invariant of this machine.
            (_, _) => Ok(self.welcome(sender)),
        }
    }

    /// Run the query pipeline and shape the reply for its origin.
    async fn lookup(&self, city: &str, source: QuerySource) -> Result<Outcome, BotError> {
        match self.provider.current_weather(city).await? {
            WeatherLookup::Found(weather) => Ok(Outcome {
                reply: Reply::text(report::render(&weather)).with_buttons(vec![
                    vec![KeyboardButton::new("Continue", ButtonAction::Continue.payload())],
                    vec![KeyboardButton::new("Done", ButtonAction::Done.payload())],
                ]),
                next: DialogState::ResultShown,
            }),
            WeatherLookup::NotFound => Ok(match source {
                QuerySource::Command => Outcome {
                    reply: Reply::text(NOT_FOUND_TEXT),
                    next: DialogState::Idle,
                },
                QuerySource::Prompt => Outcome {
                    reply: Reply::text(NOT_FOUND_RETRY_TEXT).with_buttons(vec![vec![
                        KeyboardButton::new("Start", ButtonAction::Restart.payload()),
                    ]]),
                    next: DialogState::AwaitingCity,
                },
            }),
        }
    }

    fn welcome(&self, sender: Option<&User>) -> Outcome {
        let name = sender.map(User::display_name).unwrap_or("there");
        let text = format!(
            "Hello {name}\n\
             \u{1F326}\u{FE0F} Welcome to {bot}! \u{1F326}\u{FE0F}\n\
             \n\
             I can fetch up-to-date weather for any city in the world.\n\
             \n\
             Here are some commands you can use:\n\
             \n\
             - /weather <city>: current conditions for a specific city\n\
             - /help: list available commands\n\
             - /start: start a new conversation\n\
             \n\
             Or press the Start button below and type a city name.",
            name = name,
            bot = self.bot_name,
        );

        Outcome {
            reply: Reply::text(text).with_buttons(vec![vec![KeyboardButton::new(
                "Start",
                ButtonAction::Begin.payload(),
            )]]),
            next: DialogState::Idle,
        }
    }
}

fn prompt_for_city() -> Outcome {
    Outcome {
        reply: Reply::text(PROMPT_TEXT),
        next: DialogState::AwaitingCity,
    }
}
