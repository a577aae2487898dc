use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::Config;
use crate::services::jokes::JokeService;
use crate::services::news::NewsService;
use crate::services::reminder::{Notifier, ReminderScheduler};
use crate::services::trivia::TriviaService;
use crate::services::weather::WeatherService;
use crate::state::{
    ConversationStore, PreferenceStore, RateLimiter, ReminderStore, TriviaStore,
};

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Process-wide bot state and collaborators, handed to every handler.
///
/// Everything here is a cheap clone handle; there are no ambient globals.
pub struct BotContext {
    pub conversations: ConversationStore,
    pub preferences: PreferenceStore,
    pub reminders: ReminderStore,
    pub trivia: TriviaStore,
    pub rate_limiter: RateLimiter,
    pub weather: WeatherService,
    pub jokes: JokeService,
    pub news: NewsService,
    pub trivia_api: TriviaService,
    pub scheduler: ReminderScheduler,
}

impl BotContext {
    pub fn new(notifier: Arc<dyn Notifier>, config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
        let reminders = ReminderStore::new();

        Ok(Self {
            conversations: ConversationStore::new(),
            preferences: PreferenceStore::new(),
            reminders: reminders.clone(),
            trivia: TriviaStore::new(),
            rate_limiter: RateLimiter::default(),
            weather: WeatherService::new(client.clone(), config.weather_api_key.clone()),
            jokes: JokeService::new(client.clone()),
            news: NewsService::new(client.clone(), config.news_api_key.clone()),
            trivia_api: TriviaService::new(client),
            scheduler: ReminderScheduler::new(notifier, reminders),
        })
    }
}
