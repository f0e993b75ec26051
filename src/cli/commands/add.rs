//! `rune add` — encrypt and store a new secret.

use crate::cli::{open_vault, output, prompt_field_values, resolve_key, resolve_name, Cli};
use crate::errors::Result;

/// Execute the `add` command.
pub fn execute(cli: &Cli, fields: &str, name: Option<&str>, key: Option<&str>) -> Result<()> {
    let values = prompt_field_values(fields)?;
    let (name, namespace) = resolve_name(name)?;
    let key = resolve_key(key)?;

    let vault = open_vault(cli)?;
    let record = vault.add(&name, &namespace, &values, &key)?;

    output::success(&format!(
        "Stored new secret '{}' with {} field(s)",
        record.full_name(),
        record.fields.len()
    ));
    output::tip("Retrieve it with `rune get -n <name>`");

    Ok(())
}
