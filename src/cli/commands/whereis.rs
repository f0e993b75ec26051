//! `rune whereis` — print where the settings and secrets files live.

use crate::cli::Cli;
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `whereis` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let mut settings = Settings::ensure()?;
    if let Some(path) = &cli.vault_file {
        settings.secrets_file = path.clone();
    }

    println!("settings: {}", Settings::path().display());
    println!("secrets:  {}", settings.secrets_file.display());

    Ok(())
}
