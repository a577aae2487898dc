use std::sync::Arc;

use teloxide::prelude::*;

use super::HandlerResult;
use crate::bot::commands::Command;
use crate::bot::{flows, menus};
use crate::context::BotContext;
use crate::utils::logging::log_command;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<BotContext>,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let username = msg
        .from()
        .map(|u| u.full_name())
        .unwrap_or_else(|| "there".to_string());

    match cmd {
        Command::Start => {
            log_command("/start", &username, chat_id.0);
            // First touch creates the preference record with defaults.
            ctx.preferences.get(chat_id).await;
            bot.send_message(
                chat_id,
                format!(
                    "👋 Hello, {username}!\n\nI'm your personal assistant bot. \
                     How can I help you today?"
                ),
            )
            .reply_markup(menus::main_menu())
            .await?;
        }
        Command::Help => {
            bot.send_message(chat_id, "Choose a help topic:")
                .reply_markup(menus::help_menu())
                .await?;
        }
        Command::About => {
            bot.send_message(chat_id, menus::ABOUT_TEXT)
                .reply_markup(menus::back_to_main())
                .await?;
        }
        Command::Weather(city) => {
            let city = city.trim();
            if city.is_empty() {
                bot.send_message(chat_id, "How would you like to get the weather?")
                    .reply_markup(menus::weather_menu())
                    .await?;
            } else {
                log_command("/weather", &username, chat_id.0);
                let reply = flows::weather_reply(&ctx, chat_id, city).await;
                send_reply(&bot, chat_id, reply).await?;
            }
        }
        Command::Joke => {
            let text = flows::joke_reply(&ctx).await;
            bot.send_message(chat_id, text)
                .reply_markup(menus::joke_keyboard())
                .await?;
        }
        Command::News => {
            bot.send_message(chat_id, "📰 Select a news category:")
                .reply_markup(menus::news_menu())
                .await?;
        }
        Command::Notes => {
            bot.send_message(chat_id, "📝 Notes Menu:")
                .reply_markup(menus::notes_menu())
                .await?;
        }
        Command::Reminders => {
            bot.send_message(chat_id, "⏰ Reminders Menu:")
                .reply_markup(menus::reminder_menu())
                .await?;
        }
        Command::Games => {
            bot.send_message(chat_id, "🎮 Games Menu:")
                .reply_markup(menus::games_menu())
                .await?;
        }
        Command::Settings => {
            let prefs = ctx.preferences.get(chat_id).await;
            bot.send_message(chat_id, menus::settings_text(&prefs))
                .reply_markup(menus::settings_menu())
                .await?;
        }
        Command::Features => {
            bot.send_message(chat_id, menus::FEATURES_TEXT)
                .reply_markup(menus::main_menu())
                .await?;
        }
    }
    Ok(())
}

pub(super) async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: flows::FlowReply,
) -> HandlerResult {
    match reply.keyboard {
        Some(keyboard) => {
            bot.send_message(chat_id, reply.text)
                .reply_markup(keyboard)
                .await?;
        }
        None => {
            bot.send_message(chat_id, reply.text).await?;
        }
    }
    Ok(())
}
