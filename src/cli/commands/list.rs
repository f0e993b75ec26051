//! `rune list` — display all secrets in a table.

use crate::cli::{open_vault, output, Cli};
use crate::errors::{Result, RuneError};
use crate::vault::SecretRecord;

/// Execute the `list` command.  Only metadata is shown — nothing is
/// decrypted, so no key is needed (unless a secret is picked for
/// retrieval in interactive mode).
pub fn execute(cli: &Cli, interactive: bool) -> Result<()> {
    let vault = open_vault(cli)?;
    let records = vault.list()?;

    output::info(&format!("{} secret(s) in the vault", records.len()));
    output::print_records_table(&records);

    if !interactive || records.is_empty() {
        return Ok(());
    }

    let names: Vec<String> = records.iter().map(SecretRecord::full_name).collect();

    let choice = dialoguer::Select::new()
        .with_prompt("Select secret to get (Esc to quit)")
        .items(&names)
        .default(0)
        .interact_opt()
        .map_err(|e| RuneError::CommandFailed(format!("selection prompt: {e}")))?;

    if let Some(index) = choice {
        super::get::execute(cli, Some(names[index].as_str()), None, false)?;
    }

    Ok(())
}
