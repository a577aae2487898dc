//! Main entry point: initializes logging, loads configuration, builds the
//! in-memory state, and runs the Telegram dispatcher alongside the health
//! server.

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod bot;
mod config;
mod context;
mod services;
mod state;
mod utils;

use crate::bot::handlers::BotHandler;
use crate::config::Config;
use crate::context::BotContext;
use crate::services::health::HealthService;
use crate::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_assistant_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    log_system_event(
        "starting",
        Some(&format!("Daily Assistant Bot v{}", env!("CARGO_PKG_VERSION"))),
    );
    if config.weather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY not set - weather lookups will be degraded");
    }
    if config.news_api_key.is_none() {
        tracing::warn!("NEWS_API_KEY not set - news headlines will be degraded");
    }

    let telegram_bot = Bot::new(&config.bot_token);
    let ctx = Arc::new(BotContext::new(Arc::new(telegram_bot.clone()), &config)?);
    let handler = BotHandler::new(ctx.clone());

    let health_service = HealthService::new(ctx.preferences.clone(), ctx.reminders.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;
    log_system_event("health server listening", Some(&config.http_port.to_string()));

    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(telegram_bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    log_system_event("stopped", None);
    Ok(())
}
