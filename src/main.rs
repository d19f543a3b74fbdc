use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;

use nimbus_bot::application::dialog::DialogEngine;
use nimbus_bot::application::dispatch::EventDispatcher;
use nimbus_bot::application::errors::BotError;
use nimbus_bot::application::messaging::EventParser;
use nimbus_bot::domain::entities::{ButtonAction, DialogEvent, User};
use nimbus_bot::domain::traits::Bot;
use nimbus_bot::infrastructure::adapters::console::ConsoleAdapter;
use nimbus_bot::infrastructure::adapters::telegram::{self, TelegramAdapter};
use nimbus_bot::infrastructure::config::{self, Config};
use nimbus_bot::infrastructure::session::InMemorySessionStore;
use nimbus_bot::infrastructure::weather::OpenWeatherClient;

#[derive(Parser)]
#[command(name = "nimbus-bot")]
#[command(about = "A conversational weather bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run {
        /// Use the console adapter instead of Telegram (dev mode)
        #[arg(long)]
        console: bool,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { console } => {
            run_bot(cli.config, console);
        }
        Commands::Version => {
            println!("nimbus-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            init_config(&cli.config);
        }
    }
}

fn init_config(path: &str) {
    match Config::default().save(path) {
        Ok(()) => println!("Wrote default config to {}", path),
        Err(e) => {
            tracing::error!("Failed to write config: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_bot(config_path: String, console: bool) {
    // Load config
    let config = if std::path::Path::new(&config_path).exists() {
        Config::load(&config_path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        })
    } else {
        Config::default()
    };

    tracing::info!("Starting {}", config.bot.name);

    // Both secrets come from the environment; a missing one is fatal.
    let api_key = match config::require_env(config::WEATHER_API_KEY_VAR) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let provider = Arc::new(OpenWeatherClient::new(api_key, config.weather.api_base.clone()));
    let engine = DialogEngine::new(provider, config.bot.name.clone());
    let dispatcher = EventDispatcher::new(engine, InMemorySessionStore::new());
    let parser = EventParser::new(&config.bot.prefix);

    let rt = tokio::runtime::Runtime::new().unwrap();

    if console {
        rt.block_on(async {
            let bot = ConsoleAdapter::new(config.bot.name.clone());
            run_console_bot(bot, &dispatcher, &parser).await;
        });
    } else {
        let token = match config::require_env(config::BOT_TOKEN_VAR) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        };
        rt.block_on(async {
            let bot = TelegramAdapter::new(token, config.bot.name.clone());
            run_telegram_bot(bot, &dispatcher, &parser, config.telegram.poll_timeout_seconds)
                .await;
        });
    }
}

async fn run_telegram_bot(
    mut bot: TelegramAdapter,
    dispatcher: &EventDispatcher<InMemorySessionStore>,
    parser: &EventParser,
    poll_timeout: i64,
) {
    // Fetch bot info
    if let Err(e) = bot.fetch_bot_info().await {
        tracing::error!("Failed to fetch bot info: {}", e);
        return;
    }
    tracing::info!("Bot started: @{}", bot.bot_info().username);

    if let Err(e) = bot.register_commands().await {
        tracing::warn!("Failed to register commands: {}", e);
    }

    let mut offset: i64 = 0;

    tracing::info!("Starting update loop...");

    loop {
        match bot.get_updates(offset, poll_timeout).await {
            Ok(updates) => {
                // One update at a time, so two events for the same session
                // never race on its state.
                for update in &updates {
                    if let Err(e) = handle_update(&bot, dispatcher, parser, update).await {
                        tracing::error!("Failed to handle update {}: {}", update.update_id, e);
                    }
                }
                offset = TelegramAdapter::next_offset(&updates).max(offset);
            }
            Err(e) => {
                tracing::error!("Failed to get updates: {}", e);
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

async fn handle_update(
    bot: &TelegramAdapter,
    dispatcher: &EventDispatcher<InMemorySessionStore>,
    parser: &EventParser,
    update: &telegram::Update,
) -> Result<(), BotError> {
    let (chat_id, event, sender) = if let Some(msg) = &update.message {
        let Some(text) = &msg.text else {
            return Ok(());
        };
        (
            msg.chat.id.to_string(),
            parser.parse_text(text),
            msg.from.as_ref().map(User::from),
        )
    } else if let Some(cb) = &update.callback_query {
        let Some(data) = &cb.data else {
            return Ok(());
        };
        let chat_id = cb
            .message
            .as_ref()
            .map(|m| m.chat.id.to_string())
            .unwrap_or_else(|| cb.from.id.to_string());
        let _ = bot.answer_callback(&cb.id, None).await;
        (chat_id, parser.parse_callback(data), Some(User::from(&cb.from)))
    } else {
        return Ok(());
    };

    dispatcher.dispatch(bot, &chat_id, event, sender.as_ref()).await
}

async fn run_console_bot(
    bot: ConsoleAdapter,
    dispatcher: &EventDispatcher<InMemorySessionStore>,
    parser: &EventParser,
) {
    tracing::info!("Console mode; type /start to begin, Ctrl-D to exit");
    let user = User::new("console").with_first_name("Console");

    loop {
        let Some(line) = bot.read_line("> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        // Typing a button's label presses that button.
        let event = match line.as_str() {
            "Start" => DialogEvent::Button(ButtonAction::Begin),
            "Continue" => DialogEvent::Button(ButtonAction::Continue),
            "Done" => DialogEvent::Button(ButtonAction::Done),
            _ => parser.parse_text(&line),
        };

        if let Err(e) = dispatcher.dispatch(&bot, "console", event, Some(&user)).await {
            tracing::error!("Failed to handle input: {}", e);
        }
    }
}
