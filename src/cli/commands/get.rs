//! `rune get` — decrypt a secret and copy fields to the clipboard.

use crate::cli::{open_vault, output, resolve_key, resolve_name, Cli};
use crate::errors::{Result, RuneError};
use crate::vault::SecretRecord;

/// Execute the `get` command.
///
/// Renders the decrypted fields (masked unless `--show`), then lets
/// the user pick fields to copy to the clipboard one at a time.
pub fn execute(cli: &Cli, name: Option<&str>, key: Option<&str>, show: bool) -> Result<()> {
    let (name, namespace) = resolve_name(name)?;
    let key = resolve_key(key)?;

    let vault = open_vault(cli)?;
    let fields = vault.get(&name, &namespace, &key)?;

    let full_name = SecretRecord::full_name_of(&name, &namespace);
    output::print_fields_table(&full_name, &fields, show);

    copy_loop(&fields)
}

/// Interactive selection loop: pick a field, copy its plaintext to the
/// clipboard, repeat until the user presses Esc.
fn copy_loop(fields: &std::collections::BTreeMap<String, String>) -> Result<()> {
    // A hand-edited vault file (or library use) can produce a record
    // with no fields; there is nothing to select then.
    if fields.is_empty() {
        return Ok(());
    }

    let names: Vec<&String> = fields.keys().collect();

    output::tip("Select a field to copy (Esc to finish)");

    loop {
        let choice = dialoguer::Select::new()
            .with_prompt("Copy field")
            .items(&names)
            .default(0)
            .interact_opt()
            .map_err(|e| RuneError::CommandFailed(format!("selection prompt: {e}")))?;

        let Some(index) = choice else {
            return Ok(());
        };

        let field = names[index];
        match copy_to_clipboard(&fields[field.as_str()]) {
            Ok(()) => output::success(&format!("Copied '{field}' to clipboard")),
            // Headless sessions have no clipboard; not worth aborting over.
            Err(e) => output::warning(&format!("Clipboard unavailable: {e}")),
        }
    }
}

fn copy_to_clipboard(value: &str) -> std::result::Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(value)
}
