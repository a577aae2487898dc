use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Assistant bot commands:")]
pub enum Command {
    #[command(description = "Start the bot and show the main menu")]
    Start,
    #[command(description = "Show the help menu")]
    Help,
    #[command(description = "Information about the bot")]
    About,
    #[command(description = "Get weather for a city, or open the weather menu")]
    Weather(String),
    #[command(description = "Get a random joke")]
    Joke,
    #[command(description = "Browse news categories")]
    News,
    #[command(description = "Manage your notes")]
    Notes,
    #[command(description = "Set and manage reminders")]
    Reminders,
    #[command(description = "Play mini-games")]
    Games,
    #[command(description = "Customize your preferences")]
    Settings,
    #[command(description = "See all available features")]
    Features,
}
