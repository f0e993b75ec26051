use clap::Parser;
use rune_vault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref fields,
            ref name,
            ref key,
        } => rune_vault::cli::commands::add::execute(&cli, fields, name.as_deref(), key.as_deref()),
        Commands::Get {
            ref name,
            ref key,
            show,
        } => rune_vault::cli::commands::get::execute(&cli, name.as_deref(), key.as_deref(), show),
        Commands::Update {
            ref fields,
            ref name,
            ref key,
        } => {
            rune_vault::cli::commands::update::execute(&cli, fields, name.as_deref(), key.as_deref())
        }
        Commands::Delete { ref name, force } => {
            rune_vault::cli::commands::delete::execute(&cli, name.as_deref(), force)
        }
        Commands::List { interactive } => {
            rune_vault::cli::commands::list::execute(&cli, interactive)
        }
        Commands::Config {
            ref encryption,
            ref secrets_file,
        } => rune_vault::cli::commands::config::execute(
            encryption.as_deref(),
            secrets_file.as_deref(),
        ),
        Commands::Whereis => rune_vault::cli::commands::whereis::execute(&cli),
    };

    if let Err(e) = result {
        rune_vault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
