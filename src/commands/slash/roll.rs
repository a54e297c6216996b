//! Roll slash command: /roll

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_roll_command()]
}

fn create_roll_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("roll")
        .description("Rolar dados. Ex: 6d6 + 2 ou 3d20")
        .create_option(|option| {
            option
                .name("expression")
                .description("Expressão de dados, ex: 6d6 + 2")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(100)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_roll_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let roll = &commands[0];
        assert_eq!(roll.0.get("name").unwrap().as_str().unwrap(), "roll");
        assert_eq!(
            roll.0.get("description").unwrap().as_str().unwrap(),
            "Rolar dados. Ex: 6d6 + 2 ou 3d20"
        );
    }
}
