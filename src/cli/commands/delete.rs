//! `rune delete` — remove a secret from the vault.

use crate::cli::{open_vault, output, resolve_name, Cli};
use crate::errors::{Result, RuneError};
use crate::vault::SecretRecord;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, name: Option<&str>, force: bool) -> Result<()> {
    let (name, namespace) = resolve_name(name)?;
    let full_name = SecretRecord::full_name_of(&name, &namespace);

    if !force {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete secret '{full_name}'? This cannot be undone"))
            .default(false)
            .interact()
            .map_err(|e| RuneError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(RuneError::UserCancelled);
        }
    }

    let vault = open_vault(cli)?;
    vault.delete(&name, &namespace)?;

    output::success(&format!("Deleted secret '{full_name}'"));

    Ok(())
}
