//! Background entry point: one bot per supervisor, status line for each request.

use llm_client::EnvLlmConfig;
use market_data::ExchangeConfig;
use pricebot::{start_bot_in_background, BotConfig, BotSupervisor, DispatchSettings, LifecycleState};
use pricebot_telegram::TelegramConfig;
use std::net::TcpListener;

fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    (listener, url)
}

/// Telegram API pointed at a local listener that accepts but never answers, so the launched bot
/// stays blocked on getMe for as long as the test runs.
fn offline_config(telegram_api_url: String) -> BotConfig {
    BotConfig {
        telegram: TelegramConfig {
            bot_token: "123456:offline".to_string(),
            telegram_api_url: Some(telegram_api_url),
            log_file: None,
        },
        llm: EnvLlmConfig {
            openai_api_key: "sk-test".to_string(),
            openai_base_url: "http://127.0.0.1:9/v1".to_string(),
            llm_model: "gpt-3.5-turbo".to_string(),
            llm_max_tokens: 200,
            llm_system_prompt: None,
        },
        exchange: ExchangeConfig {
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            requests_per_second: 20,
        },
        dispatch: DispatchSettings {
            allowed_chat_id: -100_200,
            command_prefix: "/".to_string(),
        },
    }
}

/// **Test: First background start reports starting; a second request reports already running.**
#[test]
fn test_background_start_twice() {
    let (_listener, url) = silent_listener();
    let supervisor = BotSupervisor::new();

    let first = start_bot_in_background(&supervisor, offline_config(url.clone())).unwrap();
    let second = start_bot_in_background(&supervisor, offline_config(url)).unwrap();

    assert_eq!(first, "Bot is starting in the background.");
    assert_eq!(second, "Bot is already running.");
    assert_ne!(supervisor.state(), LifecycleState::Uninitialized);
}

/// **Test: A background request after the slot is taken does not launch anything.**
#[test]
fn test_background_start_when_already_starting() {
    let (_listener, url) = silent_listener();
    let supervisor = BotSupervisor::new();
    supervisor.begin_start();

    let status = start_bot_in_background(&supervisor, offline_config(url)).unwrap();

    assert_eq!(status, "Bot is already running.");
    assert_eq!(supervisor.state(), LifecycleState::Starting);
}
