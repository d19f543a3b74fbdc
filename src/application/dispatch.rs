//! Event dispatch - runs one inbound event through the dialog machine
//!
//! Shared by every platform run loop so delivery and failure recovery
//! behave the same regardless of adapter.

use crate::application::dialog::{DialogEngine, Outcome, Reply};
use crate::application::errors::BotError;
use crate::domain::entities::{ButtonAction, DialogEvent, DialogState, Session, User};
use crate::domain::traits::{Bot, KeyboardButton, SessionStore};

const PROVIDER_DOWN_TEXT: &str = "\
The weather service is unavailable right now.\n\
Please press Start and try again in a moment.";

/// Runs events through the engine, delivers replies, and persists the
/// resulting state.
pub struct EventDispatcher<S: SessionStore> {
    engine: DialogEngine,
    store: S,
}

impl<S: SessionStore> EventDispatcher<S> {
    pub fn new(engine: DialogEngine, store: S) -> Self {
        Self { engine, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one event through the dialog machine and deliver the reply.
    ///
    /// A provider failure is not the user's fault: it is logged, the
    /// session resets to idle, and the user gets a retry path instead of
    /// silence.
    pub async fn dispatch<B: Bot>(
        &self,
        bot: &B,
        chat_id: &str,
        event: DialogEvent,
        sender: Option<&User>,
    ) -> Result<(), BotError> {
        let session = self.store.load(chat_id).await?;

        let outcome = match self.engine.handle(&session, event, sender).await {
            Ok(outcome) => outcome,
            Err(BotError::Weather(e)) => {
                tracing::error!("Weather lookup failed for chat {}: {}", chat_id, e);
                Outcome {
                    reply: Reply::text(PROVIDER_DOWN_TEXT).with_buttons(vec![vec![
                        KeyboardButton::new("Start", ButtonAction::Restart.payload()),
                    ]]),
                    next: DialogState::Idle,
                }
            }
            Err(e) => return Err(e),
        };

        if outcome.reply.buttons.is_empty() {
            bot.send_message(chat_id, &outcome.reply.text).await?;
        } else {
            bot.send_with_keyboard(chat_id, &outcome.reply.text, outcome.reply.buttons)
                .await?;
        }

        self.store
            .save(&Session::new(chat_id).with_state(outcome.next))
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::errors::WeatherError;
    use crate::domain::entities::WeatherLookup;
    use crate::domain::traits::{BotInfo, WeatherProvider};
    use crate::infrastructure::session::InMemorySessionStore;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Provider that always fails at the transport level.
    struct FailingProvider;

    #[async_trait]
    impl WeatherProvider for FailingProvider {
        async fn current_weather(&self, _city: &str) -> Result<WeatherLookup, WeatherError> {
            Err(WeatherError::Network("connection refused".to_string()))
        }
    }

    /// Bot stub that records everything it is asked to send.
    #[derive(Default)]
    struct RecordingBot {
        sent: Mutex<Vec<(String, Vec<Vec<KeyboardButton>>)>>,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
            self.sent.lock().unwrap().push((text.to_string(), Vec::new()));
            Ok("recorded".to_string())
        }

        async fn send_with_keyboard(
            &self,
            _chat_id: &str,
            text: &str,
            buttons: Vec<Vec<KeyboardButton>>,
        ) -> Result<String, BotError> {
            self.sent.lock().unwrap().push((text.to_string(), buttons));
            Ok("recorded".to_string())
        }

        async fn answer_callback(
            &self,
            _callback_id: &str,
            _text: Option<&str>,
        ) -> Result<(), BotError> {
            Ok(())
        }

        fn bot_info(&self) -> BotInfo {
            BotInfo {
                id: "stub".to_string(),
                name: "stub".to_string(),
                username: "stub".to_string(),
            }
        }
    }

    fn dispatcher() -> EventDispatcher<InMemorySessionStore> {
        EventDispatcher::new(
            DialogEngine::new(Arc::new(FailingProvider), "nimbus-bot"),
            InMemorySessionStore::new(),
        )
    }

    #[tokio::test]
    async fn plain_replies_go_without_a_keyboard() {
        let d = dispatcher();
        let bot = RecordingBot::default();

        d.dispatch(&bot, "u1", DialogEvent::Help, None).await.unwrap();

        let sent = bot.sent.lock().unwrap();
        let (text, buttons) = sent.last().unwrap();
        assert!(text.contains("/weather"));
        assert!(buttons.is_empty());
    }

    #[tokio::test]
    async fn replies_with_buttons_go_through_the_keyboard_path() {
        let d = dispatcher();
        let bot = RecordingBot::default();

        d.dispatch(&bot, "u1", DialogEvent::Start, None).await.unwrap();

        let sent = bot.sent.lock().unwrap();
        let (_, buttons) = sent.last().unwrap();
        assert_eq!(buttons[0][0].callback_data, "begin");
        drop(sent);

        assert_eq!(d.store().load("u1").await.unwrap().state, DialogState::Idle);
    }
}
