//! `rune update` — re-encrypt and merge fields into an existing secret.

use crate::cli::{open_vault, output, prompt_field_values, resolve_key, resolve_name, Cli};
use crate::errors::Result;

/// Execute the `update` command.
///
/// Only the named fields change; every other field of the secret keeps
/// its existing encrypted value.  The key must match the one the
/// secret was stored under — the vault rejects a mismatch before
/// writing anything.
pub fn execute(cli: &Cli, fields: &str, name: Option<&str>, key: Option<&str>) -> Result<()> {
    let values = prompt_field_values(fields)?;
    let (name, namespace) = resolve_name(name)?;
    let key = resolve_key(key)?;

    let vault = open_vault(cli)?;
    let record = vault.update(&name, &namespace, &values, &key)?;

    output::success(&format!(
        "Updated secret '{}' ({} field(s) total)",
        record.full_name(),
        record.fields.len()
    ));

    Ok(())
}
