//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, RuneError};
use crate::vault::SecretVault;

const NAME_HELP: &str = "Secret name; namespaces are slash-separated prefixes (e.g. db/prod/my-database). Prompted for if omitted";
const FIELDS_HELP: &str = "Comma-separated field names to store (e.g. host,port,password); values are prompted for secretly";
const KEY_HELP: &str = "Encryption key (prompted for if omitted)";

/// Rune CLI: local encrypted secret vault.
#[derive(Parser)]
#[command(name = "rune", about = "Local encrypted secret vault", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file to use (default: from settings.json)
    #[arg(long, global = true)]
    pub vault_file: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new secret to the vault
    Add {
        #[arg(short, long, help = FIELDS_HELP)]
        fields: String,

        #[arg(short, long, help = NAME_HELP)]
        name: Option<String>,

        #[arg(short, long, help = KEY_HELP, env = "RUNE_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Retrieve a secret and copy fields to the clipboard
    Get {
        #[arg(short, long, help = NAME_HELP)]
        name: Option<String>,

        #[arg(short, long, help = KEY_HELP, env = "RUNE_KEY", hide_env_values = true)]
        key: Option<String>,

        /// Show decrypted values in the terminal instead of masking them
        #[arg(short, long)]
        show: bool,
    },

    /// Update fields of an existing secret
    Update {
        #[arg(short, long, help = FIELDS_HELP)]
        fields: String,

        #[arg(short, long, help = NAME_HELP)]
        name: Option<String>,

        #[arg(short, long, help = KEY_HELP, env = "RUNE_KEY", hide_env_values = true)]
        key: Option<String>,
    },

    /// Remove a secret from the vault
    Delete {
        #[arg(short, long, help = NAME_HELP)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all secrets
    List {
        /// Pick a secret from the list and retrieve it
        #[arg(short, long)]
        interactive: bool,
    },

    /// Persistently change the configured encryption or vault location
    Config {
        /// Algorithm for new fields ("aesgcm" or "no-encryption")
        #[arg(short, long)]
        encryption: Option<String>,

        /// Where to store secrets (e.g. ~/.secrets.json)
        #[arg(short = 'f', long)]
        secrets_file: Option<PathBuf>,
    },

    /// Show the location of the settings file and the secrets file
    Whereis,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings (creating the default settings file on first run),
/// apply CLI overrides, make sure the vault file exists, and open the
/// vault.
pub fn open_vault(cli: &Cli) -> Result<SecretVault> {
    let mut settings = Settings::ensure()?;
    if let Some(path) = &cli.vault_file {
        settings.secrets_file = path.clone();
    }

    let vault = SecretVault::open(&settings)?;
    vault.store().ensure_exists()?;
    Ok(vault)
}

/// Split a user-supplied name into `(name, namespace)`.
///
/// The last slash-separated segment is the name; everything before it
/// is the namespace, with stray leading/trailing slashes stripped.
pub fn split_full_name(input: &str) -> (String, String) {
    match input.rsplit_once('/') {
        None => (input.to_string(), String::new()),
        Some((namespace, name)) => (
            name.to_string(),
            namespace.trim_matches('/').trim().to_string(),
        ),
    }
}

/// Resolve the secret name from the CLI argument or an interactive
/// prompt, split into name and namespace.
pub fn resolve_name(arg: Option<&str>) -> Result<(String, String)> {
    let input = match arg {
        Some(n) => n.to_string(),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Secret name")
            .interact_text()
            .map_err(|e| RuneError::CommandFailed(format!("name prompt: {e}")))?,
    };

    let (name, namespace) = split_full_name(input.trim().trim_end_matches('/'));
    if name.is_empty() {
        return Err(RuneError::CommandFailed(
            "secret name cannot be empty".into(),
        ));
    }

    Ok((name, namespace))
}

/// Get the encryption key from the `-k/--key` argument (clap also
/// fills it from the `RUNE_KEY` env var, for CI/CD) or an interactive
/// hidden prompt.
///
/// Returns `Zeroizing<String>` so the key is wiped from memory on drop.
pub fn resolve_key(arg: Option<&str>) -> Result<Zeroizing<String>> {
    if let Some(key) = arg {
        return Ok(Zeroizing::new(key.to_string()));
    }

    let key = dialoguer::Password::new()
        .with_prompt("Encryption key")
        .interact()
        .map_err(|e| RuneError::CommandFailed(format!("key prompt: {e}")))?;
    Ok(Zeroizing::new(key))
}

/// Prompt a hidden value for every comma-separated field name.
pub fn prompt_field_values(fields_arg: &str) -> Result<BTreeMap<String, String>> {
    let names: Vec<&str> = fields_arg
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        return Err(RuneError::CommandFailed(
            "at least one field name is required (e.g. -f host,port,password)".into(),
        ));
    }

    let mut values = BTreeMap::new();
    for name in names {
        let value = dialoguer::Password::new()
            .with_prompt(format!("Value for field '{name}'"))
            .interact()
            .map_err(|e| RuneError::CommandFailed(format!("field prompt: {e}")))?;
        values.insert(name.to_string(), value);
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_has_empty_namespace() {
        assert_eq!(split_full_name("api-key"), ("api-key".into(), "".into()));
    }

    #[test]
    fn single_namespace_segment() {
        assert_eq!(split_full_name("db/prod"), ("prod".into(), "db".into()));
    }

    #[test]
    fn nested_namespace_segments() {
        assert_eq!(
            split_full_name("db/prod/primary"),
            ("primary".into(), "db/prod".into())
        );
    }

    #[test]
    fn stray_slashes_are_stripped_from_namespace() {
        assert_eq!(
            split_full_name("/db/prod"),
            ("prod".into(), "db".into())
        );
    }

    #[test]
    fn key_argument_is_filled_from_rune_key_env() {
        std::env::set_var("RUNE_KEY", "key-from-env");
        let cli = Cli::try_parse_from(["rune", "get", "-n", "db/prod"]).unwrap();
        std::env::remove_var("RUNE_KEY");

        match cli.command {
            Commands::Get { key, .. } => assert_eq!(key.as_deref(), Some("key-from-env")),
            _ => unreachable!("parsed a get command"),
        }
    }
}
