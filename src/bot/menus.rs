//! Inline keyboards and static screen texts. Button callback data is the
//! routing tag echoed back to the callback handler.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::state::preferences::UserPreferences;

/// The settings screen, rendered from the user's current record.
pub fn settings_text(prefs: &UserPreferences) -> String {
    format!(
        "⚙️ Your Settings:\n\n\
         🌡️ Temperature Unit: {}\n\
         🔔 Notifications: {}\n\
         🎨 Theme: {}",
        prefs.temperature_unit.label(),
        if prefs.notifications { "Enabled" } else { "Disabled" },
        prefs.theme.label(),
    )
}

fn button(label: &str, tag: impl Into<String>) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label.to_string(), tag.into())
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🌤️ Weather", "weather_menu"), button("😂 Jokes", "joke")],
        vec![button("📰 News", "news_menu"), button("🎮 Games", "games_menu")],
        vec![
            button("⏰ Reminders", "reminder_menu"),
            button("📝 Notes", "notes_menu"),
        ],
        vec![button("⚙️ Settings", "settings"), button("ℹ️ About", "about")],
        vec![button("❓ Help", "help")],
    ])
}

pub fn back_to_main() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Back to Main Menu", "main_menu")]])
}

pub fn weather_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🔍 Search City", "weather_search")],
        vec![button("🌡️ Weather Forecast", "weather_forecast")],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn weather_result() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Back to Weather Menu", "weather_menu")]])
}

pub fn joke_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("😂 Another Joke", "joke")],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn news_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("🌍 World", "news_general"),
            button("💼 Business", "news_business"),
        ],
        vec![
            button("🏥 Health", "news_health"),
            button("🔬 Science", "news_science"),
        ],
        vec![
            button("⚽ Sports", "news_sports"),
            button("💻 Technology", "news_technology"),
        ],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn news_result(category: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🔙 News Categories", "news_menu")],
        vec![button("🔄 Refresh", format!("news_{category}"))],
        vec![button("🔙 Main Menu", "main_menu")],
    ])
}

pub fn notes_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("📝 Create Note", "create_note"),
            button("📋 View Notes", "view_notes"),
        ],
        vec![
            button("🔍 Find Note", "find_note"),
            button("🗑️ Delete Note", "delete_note"),
        ],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn note_saved() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("📝 View Notes", "view_notes"),
        button("🔙 Main Menu", "main_menu"),
    ]])
}

pub fn notes_list() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("📝 Create Note", "create_note"),
            button("📖 View Note", "view_note_by_id"),
        ],
        vec![
            button("🗑️ Delete Note", "delete_note"),
            button("🔙 Notes Menu", "notes_menu"),
        ],
    ])
}

pub fn no_notes() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("📝 Create Note", "create_note")],
        vec![button("🔙 Notes Menu", "notes_menu")],
    ])
}

pub fn back_to_notes() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Notes Menu", "notes_menu")]])
}

pub fn reminder_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("⏰ Set Reminder", "set_reminder"),
            button("📋 View Reminders", "view_reminders"),
        ],
        vec![button("🗑️ Delete Reminder", "delete_reminder")],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn reminder_set() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("⏰ View Reminders", "view_reminders"),
        button("🔙 Main Menu", "main_menu"),
    ]])
}

pub fn reminders_list() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("⏰ Set Reminder", "set_reminder"),
            button("🗑️ Delete Reminder", "delete_reminder"),
        ],
        vec![button("🔙 Reminders Menu", "reminder_menu")],
    ])
}

pub fn no_reminders() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("⏰ Set Reminder", "set_reminder")],
        vec![button("🔙 Reminders Menu", "reminder_menu")],
    ])
}

pub fn back_to_reminders() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Reminders Menu", "reminder_menu")]])
}

pub fn reminder_fired_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        button("⏰ Set New Reminder", "set_reminder"),
        button("🔙 Main Menu", "main_menu"),
    ]])
}

pub fn games_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("🎲 Dice Game", "game_dice"),
            button("🔢 Number Guess", "game_number"),
        ],
        vec![
            button("✂️ Rock Paper Scissors", "game_rps"),
            button("🎯 Trivia", "game_trivia"),
        ],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn dice_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🎲 Roll Again", "game_dice")],
        vec![button("🔙 Games Menu", "games_menu")],
    ])
}

pub fn play_again(game_tag: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🎮 Play Again", game_tag)],
        vec![button("🔙 Games Menu", "games_menu")],
    ])
}

pub fn rps_choices() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("✊ Rock", "rps_rock"),
            button("✋ Paper", "rps_paper"),
            button("✂️ Scissors", "rps_scissors"),
        ],
        vec![button("🔙 Games Menu", "games_menu")],
    ])
}

pub fn trivia_answers(answers: &[String]) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| vec![button(answer, format!("trivia_{i}"))])
        .collect();
    rows.push(vec![button("🔙 Games Menu", "games_menu")]);
    InlineKeyboardMarkup::new(rows)
}

pub fn trivia_result() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🎯 Another Question", "game_trivia")],
        vec![button("🔙 Games Menu", "games_menu")],
    ])
}

pub fn settings_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("🌡️ Temperature Unit", "settings_temp"),
            button("🔔 Notifications", "settings_notif"),
        ],
        vec![button("🎨 Theme", "settings_theme")],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn temperature_choices() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("°C Celsius", "set_temp_celsius"),
            button("°F Fahrenheit", "set_temp_fahrenheit"),
        ],
        vec![button("🔙 Back to Settings", "settings")],
    ])
}

pub fn notification_choices() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("🔔 Enable", "set_notif_on"),
            button("🔕 Disable", "set_notif_off"),
        ],
        vec![button("🔙 Back to Settings", "settings")],
    ])
}

pub fn theme_choices() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            button("☀️ Light", "set_theme_light"),
            button("🌙 Dark", "set_theme_dark"),
        ],
        vec![button("🔙 Back to Settings", "settings")],
    ])
}

pub fn back_to_settings() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Back to Settings", "settings")]])
}

pub fn help_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![button("🤖 Bot Commands", "help_commands")],
        vec![
            button("🌐 Weather", "help_weather"),
            button("📰 News", "help_news"),
        ],
        vec![
            button("😂 Jokes", "help_jokes"),
            button("🎮 Games", "help_games"),
        ],
        vec![
            button("⏰ Reminders", "help_reminders"),
            button("📝 Notes", "help_notes"),
        ],
        vec![button("⚙️ Settings", "help_settings")],
        vec![button("🔙 Back to Main Menu", "main_menu")],
    ])
}

pub fn back_to_help() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![button("🔙 Back to Help", "help")]])
}

pub const ABOUT_TEXT: &str = "📱 Telegram Assistant Bot\n\n\
    I'm a versatile bot designed to make your Telegram experience better.\n\
    I can provide weather updates, tell jokes, deliver news, set reminders, and more!\n\n\
    Type /help to see all available commands.";

pub const FEATURES_TEXT: &str = "🔍 Available Features:\n\n\
    • 🌤️ Weather: Get current weather and forecasts\n\
    • 😂 Jokes: Enjoy random jokes\n\
    • 📰 News: Read the latest news by category\n\
    • 📝 Notes: Create and manage notes\n\
    • ⏰ Reminders: Set and manage reminders\n\
    • 🎮 Games: Play fun mini-games\n\
    • ⚙️ Settings: Customize your experience\n\
    • ❓ Help: Get assistance with bot commands\n\
    • ℹ️ About: Learn more about this bot\n\n\
    What would you like to try?";

pub const HELP_COMMANDS_TEXT: &str = "🤖 Bot Commands:\n\n\
    /start - Start the bot and show main menu\n\
    /help - Show help menu\n\
    /about - Information about the bot\n\
    /weather - Get weather updates\n\
    /joke - Get a random joke\n\
    /news - Browse news categories\n\
    /notes - Manage your notes\n\
    /reminders - Set and manage reminders\n\
    /games - Play mini-games\n\
    /settings - Customize your preferences\n\
    /features - See all available features";

pub const HELP_WEATHER_TEXT: &str = "🌤️ Weather Feature:\n\n\
    Get current weather conditions and forecasts for any location.\n\n\
    Usage:\n\
    • /weather - Opens the weather menu\n\
    • /weather [city] - Gets weather for a specific city\n\
    • Share your location - Gets weather for your current location\n\n\
    The weather data includes temperature, condition, humidity, wind speed, and a 3-day forecast.";

pub const HELP_NEWS_TEXT: &str = "📰 News Feature:\n\n\
    Get the latest news from various categories.\n\n\
    Usage:\n\
    • /news - Opens the news category menu\n\n\
    Available Categories:\n\
    • World\n• Business\n• Health\n• Science\n• Sports\n• Technology";

pub const HELP_JOKES_TEXT: &str = "😂 Jokes Feature:\n\n\
    Enjoy random jokes for entertainment.\n\n\
    Usage:\n\
    • /joke - Get a random joke\n\
    • 'Another Joke' button - Get another random joke";

pub const HELP_GAMES_TEXT: &str = "🎮 Games Feature:\n\n\
    Play fun mini-games right in your chat.\n\n\
    Available Games:\n\
    • 🎲 Dice Game - Roll dice and try your luck\n\
    • 🔢 Number Guess - Guess a number between 1-100\n\
    • ✂️ Rock Paper Scissors - Play against the bot\n\
    • 🎯 Trivia - Test your knowledge\n\n\
    Use /games to access the games menu.";

pub const HELP_REMINDERS_TEXT: &str = "⏰ Reminders Feature:\n\n\
    Set and manage reminders for important tasks.\n\n\
    Usage:\n\
    • /reminders - Opens the reminders menu\n\
    • 'Set Reminder' - Create a new reminder\n\
    • 'View Reminders' - See all your active reminders\n\
    • 'Delete Reminder' - Remove a specific reminder\n\n\
    You can set reminders using formats like:\n\
    • 10m (10 minutes)\n• 2h (2 hours)\n• 1d (1 day)\n• 14:30 (specific time)";

pub const HELP_NOTES_TEXT: &str = "📝 Notes Feature:\n\n\
    Create and manage personal notes.\n\n\
    Usage:\n\
    • /notes - Opens the notes menu\n\
    • 'Create Note' - Add a new note\n\
    • 'View Notes' - See all your saved notes\n\
    • 'Find Note' - Search for specific notes\n\
    • 'Delete Note' - Remove a specific note";

pub const HELP_SETTINGS_TEXT: &str = "⚙️ Settings Feature:\n\n\
    Customize your bot experience.\n\n\
    Available Settings:\n\
    • 🌡️ Temperature Unit - Choose between Celsius/Fahrenheit\n\
    • 🔔 Notifications - Enable/disable notifications\n\
    • 🎨 Theme - Choose between light/dark theme\n\n\
    Settings last until the bot restarts.";
