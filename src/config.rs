use anyhow::{anyhow, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub weather_api_key: Option<String>,
    pub news_api_key: Option<String>,
    pub http_port: u16,
}

impl Config {
    /// Reads configuration from the environment. Only the bot token is
    /// required; a missing provider key degrades that one feature with a
    /// user-visible message instead of failing startup.
    pub fn from_env() -> Result<Self> {
        let token = env::var("BOT_TOKEN").map_err(|_| anyhow!("BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("BOT_TOKEN must be set"));
        }

        let port_str = env::var("HTTP_PORT").unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        Ok(Config {
            bot_token: token,
            weather_api_key: optional_var("WEATHER_API_KEY"),
            news_api_key: optional_var("NEWS_API_KEY"),
            http_port,
        })
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
