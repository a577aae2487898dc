use std::sync::Arc;

use teloxide::prelude::*;

use super::message::send_reply;
use super::HandlerResult;
use crate::bot::flows;
use crate::context::BotContext;
use crate::utils::logging::log_dropped;

/// Handles everything the command filter did not claim: location shares,
/// unknown slash commands, and free text driving a pending conversation.
pub async fn text_handler(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> HandlerResult {
    let chat_id = msg.chat.id;

    if let Some(location) = msg.location() {
        let reply =
            flows::respond_to_location(&ctx, chat_id, location.latitude, location.longitude).await;
        return send_reply(&bot, chat_id, reply).await;
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    if text.starts_with('/') {
        let command = text.split_whitespace().next().unwrap_or(text);
        bot.send_message(
            chat_id,
            format!("Unknown command: {command}\nUse /help to see all available commands."),
        )
        .await?;
        return Ok(());
    }

    // Bot-wide gate on non-command text; commands and callbacks bypass it.
    if !ctx.rate_limiter.allow(chat_id).await {
        log_dropped("rate limited", chat_id.0);
        return Ok(());
    }

    if let Some(reply) = flows::respond_to_text(&ctx, chat_id, text).await {
        send_reply(&bot, chat_id, reply).await?;
    }
    // Idle users with no pending flow get no response.
    Ok(())
}
