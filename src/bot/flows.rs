//! The conversational state machine: free-text input against each user's
//! pending-input marker. Produces plain reply data for the gateway layer,
//! so the whole machine is drivable in tests without a live bot.

use chrono::{Local, Utc};
use teloxide::types::{ChatId, InlineKeyboardMarkup};

use crate::bot::menus;
use crate::context::BotContext;
use crate::services::{jokes, news, trivia, weather};
use crate::state::conversation::{evaluate_guess, ConversationState, GuessOutcome};
use crate::utils::datetime::{format_datetime, parse_reminder_time};
use crate::utils::logging::log_provider_error;
use crate::utils::validation::{parse_item_id, validate_note_title, validate_reminder_text};

/// One outbound response: text plus an optional inline keyboard.
#[derive(Debug, Clone)]
pub struct FlowReply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl FlowReply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: None,
        }
    }

    fn with_keyboard(text: impl Into<String>, keyboard: InlineKeyboardMarkup) -> Self {
        Self {
            text: text.into(),
            keyboard: Some(keyboard),
        }
    }
}

/// Advances the sender's conversation, if one is pending.
///
/// Returns `None` when the user is idle so the caller can fall through to
/// other handlers. Every non-idle branch decides the next state itself:
/// all of them return to idle on completion, and all but
/// `AwaitingReminderTime` and an invalid guess advance even on bad input.
pub async fn respond_to_text(ctx: &BotContext, user: ChatId, text: &str) -> Option<FlowReply> {
    let state = ctx.conversations.get(user).await?;
    let input = text.trim();

    let reply = match state {
        ConversationState::AwaitingCity(_) => {
            ctx.conversations.clear(user).await;
            weather_reply(ctx, user, input).await
        }

        ConversationState::AwaitingNoteTitle => match validate_note_title(input) {
            Ok(title) => {
                let reply = FlowReply::text(format!(
                    "📝 Title: {title}\n\nNow please type the content of your note:"
                ));
                ctx.conversations
                    .set(user, ConversationState::AwaitingNoteContent { title })
                    .await;
                reply
            }
            Err(e) => {
                ctx.conversations.clear(user).await;
                FlowReply::with_keyboard(format!("⚠️ {e}"), menus::back_to_notes())
            }
        },

        ConversationState::AwaitingNoteContent { title } => {
            ctx.conversations.clear(user).await;
            let note = ctx.preferences.add_note(user, title, input.to_string()).await;
            FlowReply::with_keyboard(
                format!(
                    "✅ Note saved successfully!\n\nTitle: {}\nID: {}",
                    note.title, note.id
                ),
                menus::note_saved(),
            )
        }

        ConversationState::AwaitingNoteId => {
            ctx.conversations.clear(user).await;
            match parse_item_id(input) {
                Some(id) => match ctx.preferences.find_note(user, id).await {
                    Some(note) => FlowReply::with_keyboard(
                        format!(
                            "📝 {} (ID: {})\n\n{}\n\nCreated: {}",
                            note.title,
                            note.id,
                            note.content,
                            format_datetime(&note.created_at)
                        ),
                        menus::back_to_notes(),
                    ),
                    None => FlowReply::with_keyboard(
                        format!("Note {id} not found."),
                        menus::back_to_notes(),
                    ),
                },
                None => FlowReply::with_keyboard(
                    "⚠️ Please enter a numeric note ID.",
                    menus::back_to_notes(),
                ),
            }
        }

        ConversationState::AwaitingNoteDeleteId => {
            ctx.conversations.clear(user).await;
            match parse_item_id(input) {
                Some(id) if ctx.preferences.delete_note(user, id).await => {
                    FlowReply::with_keyboard(
                        format!("🗑️ Note {id} deleted."),
                        menus::back_to_notes(),
                    )
                }
                Some(id) => FlowReply::with_keyboard(
                    format!("Note {id} not found."),
                    menus::back_to_notes(),
                ),
                None => FlowReply::with_keyboard(
                    "⚠️ Please enter a numeric note ID.",
                    menus::back_to_notes(),
                ),
            }
        }

        ConversationState::AwaitingNoteSearch => {
            ctx.conversations.clear(user).await;
            let matches = ctx.preferences.search_notes(user, input).await;
            if matches.is_empty() {
                FlowReply::with_keyboard(
                    format!("🔍 No notes matching '{input}'."),
                    menus::back_to_notes(),
                )
            } else {
                let mut text = format!("🔍 Notes matching '{input}':\n\n");
                for note in &matches {
                    text.push_str(&format!("• {} (ID: {})\n", note.title, note.id));
                }
                FlowReply::with_keyboard(text, menus::notes_list())
            }
        }

        ConversationState::AwaitingReminderText => match validate_reminder_text(input) {
            Ok(text) => {
                let reply = FlowReply::text(format!(
                    "📝 Reminder text: {text}\n\n\
                     Now please specify when to remind you.\n\
                     Examples: 10m (10 minutes), 2h (2 hours), 1d (1 day), \
                     or enter a specific time like '14:30'"
                ));
                ctx.conversations
                    .set(user, ConversationState::AwaitingReminderTime { text })
                    .await;
                reply
            }
            Err(e) => {
                ctx.conversations.clear(user).await;
                FlowReply::with_keyboard(format!("⚠️ {e}"), menus::back_to_reminders())
            }
        },

        ConversationState::AwaitingReminderTime { text } => {
            match parse_reminder_time(input, &Local::now()) {
                // Parse failure is the one non-advancing failure: keep the
                // state and re-prompt.
                None => FlowReply::text(
                    "⚠️ Invalid time format. Please use formats like:\n\
                     10m (10 minutes)\n\
                     2h (2 hours)\n\
                     1d (1 day)\n\
                     14:30 (specific time)",
                ),
                Some(fire_at) => {
                    ctx.conversations.clear(user).await;
                    let fire_at = fire_at.with_timezone(&Utc);
                    let delay = (fire_at - Utc::now())
                        .to_std()
                        .unwrap_or(std::time::Duration::ZERO);

                    let reminder = ctx.reminders.add(user, text, fire_at).await;
                    ctx.scheduler.schedule(user, &reminder, delay).await;

                    FlowReply::with_keyboard(
                        format!(
                            "✅ Reminder set successfully!\n\n📝 {}\n⏰ {}\n🆔 Reminder ID: {}",
                            reminder.text,
                            format_datetime(&reminder.fire_at),
                            reminder.id
                        ),
                        menus::reminder_set(),
                    )
                }
            }
        }

        ConversationState::AwaitingReminderDeleteId => {
            ctx.conversations.clear(user).await;
            match parse_item_id(input) {
                Some(id) if ctx.scheduler.cancel(user, id).await => FlowReply::with_keyboard(
                    format!("🗑️ Reminder {id} deleted."),
                    menus::back_to_reminders(),
                ),
                Some(id) => FlowReply::with_keyboard(
                    format!("Reminder {id} not found."),
                    menus::back_to_reminders(),
                ),
                None => FlowReply::with_keyboard(
                    "⚠️ Please enter a numeric reminder ID.",
                    menus::back_to_reminders(),
                ),
            }
        }

        ConversationState::PlayingNumberGuess { target, attempts } => {
            match evaluate_guess(target, attempts, input) {
                GuessOutcome::Invalid => {
                    // Attempts untouched, state unchanged.
                    FlowReply::text("Please enter a valid number between 1 and 100!")
                }
                GuessOutcome::Correct { attempts } => {
                    ctx.conversations.clear(user).await;
                    FlowReply::with_keyboard(
                        format!(
                            "🎉 Congratulations! You got it in {attempts} attempts!\n\
                             The number was {target}"
                        ),
                        menus::play_again("game_number"),
                    )
                }
                hint => {
                    let attempts = attempts + 1;
                    ctx.conversations
                        .set(user, ConversationState::PlayingNumberGuess { target, attempts })
                        .await;
                    let direction = if hint == GuessOutcome::TooLow {
                        "higher"
                    } else {
                        "lower"
                    };
                    FlowReply::text(format!("Try {direction}! (Attempt {attempts})"))
                }
            }
        }
    };

    Some(reply)
}

/// Weather for a shared location; not gated on a pending state.
pub async fn respond_to_location(ctx: &BotContext, user: ChatId, lat: f64, lon: f64) -> FlowReply {
    weather_reply(ctx, user, &format!("{lat},{lon}")).await
}

/// Weather lookup rendered with the user's preferred unit; provider
/// failures become the fixed apology string.
pub async fn weather_reply(ctx: &BotContext, user: ChatId, query: &str) -> FlowReply {
    if !ctx.weather.is_configured() {
        return FlowReply::with_keyboard(weather::NOT_CONFIGURED_MESSAGE, menus::weather_result());
    }

    let unit = ctx.preferences.get(user).await.temperature_unit;
    let text = match ctx.weather.forecast(query).await {
        Ok(report) => weather::format_report(&report, unit),
        Err(e) => {
            log_provider_error("weather", &format!("{e:#}"));
            weather::unavailable_message(query)
        }
    };

    FlowReply::with_keyboard(text, menus::weather_result())
}

pub async fn joke_reply(ctx: &BotContext) -> String {
    match ctx.jokes.random_joke().await {
        Ok(joke) => jokes::format_joke(&joke),
        Err(e) => {
            log_provider_error("jokes", &format!("{e:#}"));
            jokes::UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

pub async fn news_reply(ctx: &BotContext, category: &str) -> String {
    if !ctx.news.is_configured() {
        return news::NOT_CONFIGURED_MESSAGE.to_string();
    }

    match ctx.news.top_headlines(category).await {
        Ok(headlines) => news::format_headlines(category, &headlines),
        Err(e) => {
            log_provider_error("news", &format!("{e:#}"));
            news::UNAVAILABLE_MESSAGE.to_string()
        }
    }
}

/// Fetches a trivia question and stores its correct answer as the user's
/// single pending answer, replacing any previous one.
pub async fn trivia_prompt(ctx: &BotContext, user: ChatId) -> FlowReply {
    match ctx.trivia_api.question().await {
        Ok(question) => {
            let answers = question.shuffled_answers();
            ctx.trivia
                .set_pending(user, question.correct_answer.clone())
                .await;
            FlowReply::with_keyboard(
                trivia::format_question(&question),
                menus::trivia_answers(&answers),
            )
        }
        Err(e) => {
            log_provider_error("trivia", &format!("{e:#}"));
            FlowReply::text(trivia::UNAVAILABLE_MESSAGE)
        }
    }
}
