//! Utility slash commands: /ping, /help, /uptime

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        simple_command("ping", "Test bot responsiveness"),
        simple_command("help", "Show available commands"),
        simple_command("uptime", "Show how long the bot has been running"),
    ]
}

fn simple_command(name: &str, description: &str) -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name(name)
        .description(description)
        .to_owned()
}
