//! File slash command: /file

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_file_command()]
}

fn create_file_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("file")
        .description("Enviar um arquivo pelo id")
        .create_option(|option| {
            option
                .name("id")
                .description("Id do arquivo")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(64)
        })
        .to_owned()
}
