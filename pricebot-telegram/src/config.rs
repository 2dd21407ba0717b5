//! Telegram connection config: token, optional API URL, optional log path.

use anyhow::Result;
use std::env;
use tracing::error;

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        if bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.trim().is_empty());
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// telegram_api_url must be a valid URL if set.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }

    /// Builds the teloxide client, pointing it at the custom API URL when one is set.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***")
            .field("telegram_api_url", &self.telegram_api_url)
            .field("log_file", &self.log_file)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["BOT_TOKEN", "TELEGRAM_API_URL", "TELOXIDE_API_URL", "LOG_FILE"] {
            env::remove_var(key);
        }
    }

    /// **Test: Explicit token wins over BOT_TOKEN; TELOXIDE_API_URL is the fallback name.**
    #[test]
    #[serial]
    fn test_load_with_overrides() {
        clear_env();
        env::set_var("BOT_TOKEN", "from_env");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("LOG_FILE", "logs/pricebot.log");

        let config = TelegramConfig::load(Some("from_cli".to_string())).unwrap();

        assert_eq!(config.bot_token, "from_cli");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://127.0.0.1:8081"));
        assert_eq!(config.log_file.as_deref(), Some("logs/pricebot.log"));
        assert!(config.validate().is_ok());
        clear_env();
    }

    /// **Test: A missing token is a startup error, not a panic.**
    #[test]
    #[serial]
    fn test_load_missing_token() {
        clear_env();
        let err = TelegramConfig::load(None).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    /// **Test: validate rejects a malformed API URL.**
    #[test]
    fn test_validate_invalid_url() {
        let config = TelegramConfig {
            bot_token: "t".to_string(),
            telegram_api_url: Some("not-a-valid-url".to_string()),
            log_file: None,
        };
        assert!(config.validate().is_err());
    }
}
