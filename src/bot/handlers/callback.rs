use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButtonKind, InlineKeyboardMarkup};

use super::HandlerResult;
use crate::bot::{flows, menus};
use crate::context::BotContext;
use crate::state::conversation::{CityPurpose, ConversationState};
use crate::state::preferences::{TemperatureUnit, Theme};
use crate::utils::logging::log_callback;

pub async fn callback_handler(bot: Bot, q: CallbackQuery, ctx: Arc<BotContext>) -> HandlerResult {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    let chat_id = q
        .message
        .as_ref()
        .map(|m| m.chat.id)
        .unwrap_or(ChatId(q.from.id.0 as i64));
    let username = q.from.username.as_deref().unwrap_or("unknown");
    log_callback(&data, username, chat_id.0);

    bot.answer_callback_query(q.id.clone()).await?;

    match data.as_str() {
        "main_menu" => edit(&bot, &q, "Main Menu:", Some(menus::main_menu())).await?,
        "about" => edit(&bot, &q, menus::ABOUT_TEXT, Some(menus::back_to_main())).await?,

        // Help topics
        "help" => edit(&bot, &q, "Choose a help topic:", Some(menus::help_menu())).await?,
        "help_commands" => help_topic(&bot, &q, menus::HELP_COMMANDS_TEXT).await?,
        "help_weather" => help_topic(&bot, &q, menus::HELP_WEATHER_TEXT).await?,
        "help_news" => help_topic(&bot, &q, menus::HELP_NEWS_TEXT).await?,
        "help_jokes" => help_topic(&bot, &q, menus::HELP_JOKES_TEXT).await?,
        "help_games" => help_topic(&bot, &q, menus::HELP_GAMES_TEXT).await?,
        "help_reminders" => help_topic(&bot, &q, menus::HELP_REMINDERS_TEXT).await?,
        "help_notes" => help_topic(&bot, &q, menus::HELP_NOTES_TEXT).await?,
        "help_settings" => help_topic(&bot, &q, menus::HELP_SETTINGS_TEXT).await?,

        // Weather
        "weather_menu" => edit(&bot, &q, "Weather Menu:", Some(menus::weather_menu())).await?,
        "weather_search" => {
            ctx.conversations
                .set(chat_id, ConversationState::AwaitingCity(CityPurpose::Current))
                .await;
            edit(
                &bot,
                &q,
                "Please type the city name (e.g., 'London', 'New York'):",
                None,
            )
            .await?;
        }
        "weather_forecast" => {
            ctx.conversations
                .set(chat_id, ConversationState::AwaitingCity(CityPurpose::Forecast))
                .await;
            edit(&bot, &q, "Please type the city name for a forecast:", None).await?;
        }

        // Jokes
        "joke" => {
            let text = flows::joke_reply(&ctx).await;
            edit(&bot, &q, &text, Some(menus::joke_keyboard())).await?;
        }

        // News
        "news_menu" => {
            edit(
                &bot,
                &q,
                "📰 Select a news category:",
                Some(menus::news_menu()),
            )
            .await?;
        }
        tag if tag.starts_with("news_") => {
            let category = tag.trim_start_matches("news_");
            if crate::services::news::CATEGORIES.contains(&category) {
                let text = flows::news_reply(&ctx, category).await;
                edit(&bot, &q, &text, Some(menus::news_result(category))).await?;
            } else {
                tracing::warn!("Unknown news category: {}", category);
            }
        }

        // Notes
        "notes_menu" => edit(&bot, &q, "📝 Notes Menu:", Some(menus::notes_menu())).await?,
        "create_note" => {
            ctx.conversations
                .set(chat_id, ConversationState::AwaitingNoteTitle)
                .await;
            edit(&bot, &q, "Please enter a title for your note:", None).await?;
        }
        "view_notes" => {
            let notes = ctx.preferences.notes(chat_id).await;
            if notes.is_empty() {
                edit(
                    &bot,
                    &q,
                    "You don't have any notes yet. Create one?",
                    Some(menus::no_notes()),
                )
                .await?;
            } else {
                let mut text = "📝 Your Notes:\n\n".to_string();
                for note in &notes {
                    text.push_str(&format!("{} (ID: {})\n", note.title, note.id));
                    text.push_str(&format!(
                        "Created: {}\n\n",
                        crate::utils::datetime::format_datetime(&note.created_at)
                    ));
                }
                edit(&bot, &q, &text, Some(menus::notes_list())).await?;
            }
        }
        "view_note_by_id" => {
            if ctx.preferences.notes(chat_id).await.is_empty() {
                edit(
                    &bot,
                    &q,
                    "You don't have any notes yet.",
                    Some(menus::back_to_notes()),
                )
                .await?;
            } else {
                ctx.conversations
                    .set(chat_id, ConversationState::AwaitingNoteId)
                    .await;
                edit(
                    &bot,
                    &q,
                    "Please enter the ID of the note you want to view:",
                    None,
                )
                .await?;
            }
        }
        "delete_note" => {
            if ctx.preferences.notes(chat_id).await.is_empty() {
                edit(
                    &bot,
                    &q,
                    "You don't have any notes to delete.",
                    Some(menus::back_to_notes()),
                )
                .await?;
            } else {
                ctx.conversations
                    .set(chat_id, ConversationState::AwaitingNoteDeleteId)
                    .await;
                edit(
                    &bot,
                    &q,
                    "Please enter the ID of the note you want to delete:",
                    None,
                )
                .await?;
            }
        }
        "find_note" => {
            ctx.conversations
                .set(chat_id, ConversationState::AwaitingNoteSearch)
                .await;
            edit(
                &bot,
                &q,
                "Please enter a keyword to search in your notes:",
                None,
            )
            .await?;
        }

        // Reminders
        "reminder_menu" => {
            edit(&bot, &q, "⏰ Reminders Menu:", Some(menus::reminder_menu())).await?;
        }
        "set_reminder" => {
            ctx.conversations
                .set(chat_id, ConversationState::AwaitingReminderText)
                .await;
            edit(
                &bot,
                &q,
                "Please enter the text for your reminder (what you want to be reminded about):",
                None,
            )
            .await?;
        }
        "view_reminders" => {
            let reminders = ctx.reminders.list(chat_id).await;
            if reminders.is_empty() {
                edit(
                    &bot,
                    &q,
                    "You don't have any active reminders. Set one?",
                    Some(menus::no_reminders()),
                )
                .await?;
            } else {
                let mut text = "⏰ Your Active Reminders:\n\n".to_string();
                for reminder in &reminders {
                    text.push_str(&format!("{} (ID: {})\n", reminder.text, reminder.id));
                    text.push_str(&format!(
                        "Time: {}\n\n",
                        crate::utils::datetime::format_datetime(&reminder.fire_at)
                    ));
                }
                edit(&bot, &q, &text, Some(menus::reminders_list())).await?;
            }
        }
        "delete_reminder" => {
            if ctx.reminders.list(chat_id).await.is_empty() {
                edit(
                    &bot,
                    &q,
                    "You don't have any active reminders to delete.",
                    Some(menus::back_to_reminders()),
                )
                .await?;
            } else {
                ctx.conversations
                    .set(chat_id, ConversationState::AwaitingReminderDeleteId)
                    .await;
                edit(
                    &bot,
                    &q,
                    "Please enter the ID of the reminder you want to delete:",
                    None,
                )
                .await?;
            }
        }

        // Games
        "games_menu" => edit(&bot, &q, "🎮 Games Menu:", Some(menus::games_menu())).await?,
        "game_dice" => {
            let roll = rand::thread_rng().gen_range(1..=6);
            edit(
                &bot,
                &q,
                &format!("🎲 You rolled a {roll}!"),
                Some(menus::dice_keyboard()),
            )
            .await?;
        }
        "game_number" => {
            let target = rand::thread_rng().gen_range(1..=100);
            ctx.conversations
                .set(
                    chat_id,
                    ConversationState::PlayingNumberGuess { target, attempts: 0 },
                )
                .await;
            edit(
                &bot,
                &q,
                "🔢 Number Guessing Game\n\n\
                 I'm thinking of a number between 1 and 100.\n\
                 Try to guess it in as few attempts as possible!\n\n\
                 Enter your guess:",
                None,
            )
            .await?;
        }
        "game_rps" => {
            edit(
                &bot,
                &q,
                "✂️ Rock Paper Scissors\n\nMake your choice:",
                Some(menus::rps_choices()),
            )
            .await?;
        }
        tag if tag.starts_with("rps_") => {
            let player = tag.trim_start_matches("rps_");
            let text = play_rps(player);
            edit(&bot, &q, &text, Some(menus::play_again("game_rps"))).await?;
        }
        "game_trivia" => {
            let reply = flows::trivia_prompt(&ctx, chat_id).await;
            edit(&bot, &q, &reply.text, reply.keyboard).await?;
        }
        tag if tag.starts_with("trivia_") => {
            match ctx.trivia.take_pending(chat_id).await {
                None => {
                    // Stale button from an already-answered question.
                    edit(
                        &bot,
                        &q,
                        "🎯 No active trivia question. Start a new one?",
                        Some(menus::trivia_result()),
                    )
                    .await?;
                }
                Some(correct_answer) => {
                    let pressed_label = pressed_button_label(&q, &data);
                    let result = if pressed_label.as_deref() == Some(correct_answer.as_str()) {
                        let score = ctx.trivia.record_correct(chat_id).await;
                        format!("✅ Correct! Great job!\n\nYour score: {score}")
                    } else {
                        let score = ctx.trivia.score(chat_id).await;
                        format!(
                            "❌ Wrong! The correct answer was: {correct_answer}\n\n\
                             Your score: {score}"
                        )
                    };
                    edit(
                        &bot,
                        &q,
                        &format!("🎯 Trivia Result\n\n{result}"),
                        Some(menus::trivia_result()),
                    )
                    .await?;
                }
            }
        }

        // Settings
        "settings" => {
            let prefs = ctx.preferences.get(chat_id).await;
            edit(
                &bot,
                &q,
                &menus::settings_text(&prefs),
                Some(menus::settings_menu()),
            )
            .await?;
        }
        "settings_temp" => {
            let prefs = ctx.preferences.get(chat_id).await;
            edit(
                &bot,
                &q,
                &format!(
                    "🌡️ Temperature Unit\n\nCurrent setting: {}\n\nSelect your preferred unit:",
                    prefs.temperature_unit.label()
                ),
                Some(menus::temperature_choices()),
            )
            .await?;
        }
        "set_temp_celsius" => {
            ctx.preferences
                .set_temperature_unit(chat_id, TemperatureUnit::Celsius)
                .await;
            edit(
                &bot,
                &q,
                "✅ Temperature unit set to Celsius",
                Some(menus::back_to_settings()),
            )
            .await?;
        }
        "set_temp_fahrenheit" => {
            ctx.preferences
                .set_temperature_unit(chat_id, TemperatureUnit::Fahrenheit)
                .await;
            edit(
                &bot,
                &q,
                "✅ Temperature unit set to Fahrenheit",
                Some(menus::back_to_settings()),
            )
            .await?;
        }
        "settings_notif" => {
            let prefs = ctx.preferences.get(chat_id).await;
            let status = if prefs.notifications { "Enabled" } else { "Disabled" };
            edit(
                &bot,
                &q,
                &format!(
                    "🔔 Notifications\n\nCurrent setting: {status}\n\nSelect your preference:"
                ),
                Some(menus::notification_choices()),
            )
            .await?;
        }
        "set_notif_on" => {
            ctx.preferences.set_notifications(chat_id, true).await;
            edit(
                &bot,
                &q,
                "✅ Notifications enabled",
                Some(menus::back_to_settings()),
            )
            .await?;
        }
        "set_notif_off" => {
            ctx.preferences.set_notifications(chat_id, false).await;
            edit(
                &bot,
                &q,
                "✅ Notifications disabled",
                Some(menus::back_to_settings()),
            )
            .await?;
        }
        "settings_theme" => {
            let prefs = ctx.preferences.get(chat_id).await;
            edit(
                &bot,
                &q,
                &format!(
                    "🎨 Theme\n\nCurrent setting: {}\n\nSelect your preference:",
                    prefs.theme.label()
                ),
                Some(menus::theme_choices()),
            )
            .await?;
        }
        "set_theme_light" => {
            ctx.preferences.set_theme(chat_id, Theme::Light).await;
            edit(
                &bot,
                &q,
                "✅ Theme set to Light",
                Some(menus::back_to_settings()),
            )
            .await?;
        }
        "set_theme_dark" => {
            ctx.preferences.set_theme(chat_id, Theme::Dark).await;
            edit(
                &bot,
                &q,
                "✅ Theme set to Dark",
                Some(menus::back_to_settings()),
            )
            .await?;
        }

        unknown => {
            tracing::warn!("Unknown callback tag: {}", unknown);
        }
    }

    Ok(())
}

/// Edits the message the button lives on; falls back to a fresh message when
/// the callback carries no message reference.
async fn edit(
    bot: &Bot,
    q: &CallbackQuery,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> HandlerResult {
    match q.message.as_ref() {
        Some(message) => {
            let request = bot.edit_message_text(message.chat.id, message.id, text);
            match keyboard {
                Some(kb) => request.reply_markup(kb).await?,
                None => request.await?,
            };
        }
        None => {
            let chat_id = ChatId(q.from.id.0 as i64);
            match keyboard {
                Some(kb) => bot.send_message(chat_id, text).reply_markup(kb).await?,
                None => bot.send_message(chat_id, text).await?,
            };
        }
    }
    Ok(())
}

async fn help_topic(bot: &Bot, q: &CallbackQuery, text: &str) -> HandlerResult {
    edit(bot, q, text, Some(menus::back_to_help())).await
}

/// The label of the button whose callback data matches `data`, read from
/// the pressed message's own keyboard. Trivia scoring compares this label
/// against the stored correct answer.
fn pressed_button_label(q: &CallbackQuery, data: &str) -> Option<String> {
    q.message
        .as_ref()
        .and_then(|m| m.reply_markup())
        .and_then(|kb| {
            kb.inline_keyboard
                .iter()
                .flatten()
                .find(|b| matches!(&b.kind, InlineKeyboardButtonKind::CallbackData(d) if d == data))
                .map(|b| b.text.clone())
        })
}

fn play_rps(player: &str) -> String {
    let choices = ["rock", "paper", "scissors"];
    let bot_choice = choices
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("rock");

    let result = if player == bot_choice {
        "It's a tie! 🤝"
    } else if matches!(
        (player, bot_choice),
        ("rock", "scissors") | ("paper", "rock") | ("scissors", "paper")
    ) {
        "You win! 🎉"
    } else {
        "I win! 😎"
    };

    format!(
        "✂️ Rock Paper Scissors\n\n\
         Your choice: {} {}\n\
         My choice: {} {}\n\n\
         {}",
        choice_emoji(player),
        capitalize(player),
        choice_emoji(bot_choice),
        capitalize(bot_choice),
        result
    )
}

fn choice_emoji(choice: &str) -> &'static str {
    match choice {
        "rock" => "✊",
        "paper" => "✋",
        "scissors" => "✂️",
        _ => "❓",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
