#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use async_trait::async_trait;
use daily_assistant_bot::bot::flows;
use daily_assistant_bot::config::Config;
use daily_assistant_bot::context::BotContext;
use daily_assistant_bot::services::reminder::Notifier;
use daily_assistant_bot::services::weather::WeatherService;
use daily_assistant_bot::state::conversation::{CityPurpose, ConversationState};
use teloxide::types::ChatId;
use tokio::sync::Mutex;

struct RecordingNotifier {
    delivered: Mutex<Vec<(ChatId, String)>>,
}

impl RecordingNotifier {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            delivered: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, user: ChatId, text: &str) -> anyhow::Result<()> {
        self.delivered.lock().await.push((user, text.to_string()));
        Ok(())
    }
}

fn test_config() -> Config {
    Config {
        bot_token: "test-token".to_string(),
        weather_api_key: None,
        news_api_key: None,
        http_port: 3000,
    }
}

fn test_context() -> (BotContext, Arc<RecordingNotifier>) {
    let notifier = RecordingNotifier::new();
    let ctx = BotContext::new(notifier.clone(), &test_config()).unwrap();
    (ctx, notifier)
}

#[tokio::test]
async fn test_idle_user_gets_no_flow_reply() {
    let (ctx, _) = test_context();

    let reply = flows::respond_to_text(&ctx, ChatId(1), "hello there").await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_note_flow_end_to_end() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    // The "Create Note" button sets the marker; then two text inputs.
    ctx.conversations
        .set(user, ConversationState::AwaitingNoteTitle)
        .await;

    let reply = flows::respond_to_text(&ctx, user, "Shopping").await.unwrap();
    assert!(reply.text.contains("Title: Shopping"));
    assert_eq!(
        ctx.conversations.get(user).await,
        Some(ConversationState::AwaitingNoteContent {
            title: "Shopping".to_string()
        })
    );

    let reply = flows::respond_to_text(&ctx, user, "milk and eggs").await.unwrap();
    assert!(reply.text.contains("Note saved successfully"));
    assert!(reply.text.contains("ID: 1"));
    assert_eq!(ctx.conversations.get(user).await, None);

    let notes = ctx.preferences.notes(user).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Shopping");
    assert_eq!(notes[0].content, "milk and eggs");
}

#[tokio::test]
async fn test_note_title_over_limit_returns_to_idle() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.conversations
        .set(user, ConversationState::AwaitingNoteTitle)
        .await;

    let reply = flows::respond_to_text(&ctx, user, &"x".repeat(101)).await.unwrap();
    assert!(reply.text.contains("⚠️"));
    assert_eq!(ctx.conversations.get(user).await, None);
    assert!(ctx.preferences.notes(user).await.is_empty());
}

#[tokio::test]
async fn test_note_view_and_delete_flows() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.preferences
        .add_note(user, "Ideas".to_string(), "write a bot".to_string())
        .await;

    ctx.conversations
        .set(user, ConversationState::AwaitingNoteId)
        .await;
    let reply = flows::respond_to_text(&ctx, user, "1").await.unwrap();
    assert!(reply.text.contains("Ideas"));
    assert!(reply.text.contains("write a bot"));

    ctx.conversations
        .set(user, ConversationState::AwaitingNoteDeleteId)
        .await;
    let reply = flows::respond_to_text(&ctx, user, "1").await.unwrap();
    assert!(reply.text.contains("Note 1 deleted"));
    assert!(ctx.preferences.notes(user).await.is_empty());

    // Malformed id advances back to idle with an error.
    ctx.conversations
        .set(user, ConversationState::AwaitingNoteDeleteId)
        .await;
    let reply = flows::respond_to_text(&ctx, user, "first").await.unwrap();
    assert!(reply.text.contains("numeric"));
    assert_eq!(ctx.conversations.get(user).await, None);
}

#[tokio::test]
async fn test_note_search_flow() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.preferences
        .add_note(user, "Groceries".to_string(), "milk".to_string())
        .await;
    ctx.preferences
        .add_note(user, "Work".to_string(), "review PR".to_string())
        .await;

    ctx.conversations
        .set(user, ConversationState::AwaitingNoteSearch)
        .await;
    let reply = flows::respond_to_text(&ctx, user, "groceries").await.unwrap();
    assert!(reply.text.contains("Groceries (ID: 1)"));
    assert!(!reply.text.contains("Work"));
}

#[tokio::test]
async fn test_reminder_flow_bad_time_keeps_state() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.conversations
        .set(user, ConversationState::AwaitingReminderText)
        .await;

    let reply = flows::respond_to_text(&ctx, user, "Buy milk").await.unwrap();
    assert!(reply.text.contains("Reminder text: Buy milk"));

    // Unparseable time re-prompts without advancing: the one state that
    // does not move on failure.
    let reply = flows::respond_to_text(&ctx, user, "bogus").await.unwrap();
    assert!(reply.text.contains("Invalid time format"));
    assert_eq!(
        ctx.conversations.get(user).await,
        Some(ConversationState::AwaitingReminderTime {
            text: "Buy milk".to_string()
        })
    );
    assert!(ctx.reminders.list(user).await.is_empty());
}

#[tokio::test]
async fn test_reminder_flow_creates_record_and_timer() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.conversations
        .set(
            user,
            ConversationState::AwaitingReminderTime {
                text: "stretch".to_string(),
            },
        )
        .await;

    let before = chrono::Utc::now();
    let reply = flows::respond_to_text(&ctx, user, "10m").await.unwrap();
    assert!(reply.text.contains("Reminder set successfully"));
    assert!(reply.text.contains("Reminder ID: 1"));
    assert_eq!(ctx.conversations.get(user).await, None);

    let reminders = ctx.reminders.list(user).await;
    assert_eq!(reminders.len(), 1);
    let offset = (reminders[0].fire_at - before).num_seconds();
    assert!((595..=605).contains(&offset), "offset was {offset}s");

    assert_eq!(ctx.scheduler.pending_timers().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_reminder_set_through_flow_fires_and_is_removed() {
    let (ctx, notifier) = test_context();
    let user = ChatId(7);

    ctx.conversations
        .set(
            user,
            ConversationState::AwaitingReminderTime {
                text: "drink water".to_string(),
            },
        )
        .await;
    flows::respond_to_text(&ctx, user, "1m").await.unwrap();
    tokio::task::yield_now().await;

    tokio::time::advance(std::time::Duration::from_secs(65)).await;
    tokio::task::yield_now().await;

    let delivered = notifier.delivered.lock().await;
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, user);
    assert_eq!(delivered[0].1, "drink water");
    drop(delivered);

    assert!(ctx.reminders.list(user).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_reminder_deleted_through_flow_never_fires() {
    let (ctx, notifier) = test_context();
    let user = ChatId(7);

    ctx.conversations
        .set(
            user,
            ConversationState::AwaitingReminderTime {
                text: "cancel me".to_string(),
            },
        )
        .await;
    flows::respond_to_text(&ctx, user, "2m").await.unwrap();

    ctx.conversations
        .set(user, ConversationState::AwaitingReminderDeleteId)
        .await;
    let reply = flows::respond_to_text(&ctx, user, "1").await.unwrap();
    assert!(reply.text.contains("Reminder 1 deleted"));
    assert_eq!(ctx.scheduler.pending_timers().await, 0);

    tokio::time::advance(std::time::Duration::from_secs(300)).await;
    tokio::task::yield_now().await;

    assert!(notifier.delivered.lock().await.is_empty());
    assert!(ctx.reminders.list(user).await.is_empty());
}

#[tokio::test]
async fn test_number_guess_transitions() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.conversations
        .set(
            user,
            ConversationState::PlayingNumberGuess {
                target: 42,
                attempts: 0,
            },
        )
        .await;

    let reply = flows::respond_to_text(&ctx, user, "50").await.unwrap();
    assert!(reply.text.contains("lower"));
    assert_eq!(
        ctx.conversations.get(user).await,
        Some(ConversationState::PlayingNumberGuess {
            target: 42,
            attempts: 1,
        })
    );

    // Invalid input re-prompts without counting an attempt.
    let reply = flows::respond_to_text(&ctx, user, "not a number").await.unwrap();
    assert!(reply.text.contains("valid number between 1 and 100"));
    assert_eq!(
        ctx.conversations.get(user).await,
        Some(ConversationState::PlayingNumberGuess {
            target: 42,
            attempts: 1,
        })
    );

    let reply = flows::respond_to_text(&ctx, user, "30").await.unwrap();
    assert!(reply.text.contains("higher"));

    let reply = flows::respond_to_text(&ctx, user, "42").await.unwrap();
    assert!(reply.text.contains("Congratulations"));
    assert!(reply.text.contains("3 attempts"));
    assert_eq!(ctx.conversations.get(user).await, None);
}

#[tokio::test]
async fn test_weather_flow_without_api_key_degrades() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.conversations
        .set(user, ConversationState::AwaitingCity(CityPurpose::Current))
        .await;

    let reply = flows::respond_to_text(&ctx, user, "London").await.unwrap();
    assert!(reply.text.contains("not configured"));
    assert_eq!(ctx.conversations.get(user).await, None);
}

#[tokio::test]
async fn test_weather_flow_provider_failure_yields_apology() {
    let (mut ctx, _) = {
        let notifier = RecordingNotifier::new();
        (
            BotContext::new(notifier.clone(), &test_config()).unwrap(),
            notifier,
        )
    };
    // Configured key but unreachable endpoint: the provider-failure path.
    ctx.weather = WeatherService::with_base_url(
        reqwest::Client::new(),
        Some("test-key".to_string()),
        "http://127.0.0.1:9",
    );

    let user = ChatId(1);
    ctx.conversations
        .set(user, ConversationState::AwaitingCity(CityPurpose::Forecast))
        .await;

    let reply = flows::respond_to_text(&ctx, user, "London").await.unwrap();
    assert!(reply.text.contains("couldn't fetch the weather for 'London'"));
    assert_eq!(ctx.conversations.get(user).await, None);
}

#[tokio::test]
async fn test_trivia_pending_answer_is_single_and_consumed() {
    let (ctx, _) = test_context();
    let user = ChatId(1);

    ctx.trivia.set_pending(user, "Paris".to_string()).await;
    ctx.trivia.set_pending(user, "Rome".to_string()).await;

    assert_eq!(ctx.trivia.take_pending(user).await, Some("Rome".to_string()));
    assert_eq!(ctx.trivia.take_pending(user).await, None);
}
