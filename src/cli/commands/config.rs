//! `rune config` — persistently change the settings file.
//!
//! This is the supported way to switch the configured algorithm or
//! relocate the vault file without hand-editing `settings.json`.
//! Changing the algorithm only affects fields written from now on;
//! existing fields keep decrypting under their own stored tags.

use std::path::Path;

use crate::cli::output;
use crate::config::Settings;
use crate::crypto::Cipher;
use crate::errors::{Result, RuneError};

/// Execute the `config` command.
pub fn execute(encryption: Option<&str>, secrets_file: Option<&Path>) -> Result<()> {
    let settings = Settings::ensure()?;
    let updated = apply(settings, encryption, secrets_file)?;
    updated.save()?;

    output::success(&format!(
        "Settings updated: encryption = '{}', secrets file = {}",
        updated.encryption,
        updated.secrets_file.display()
    ));

    Ok(())
}

/// Apply the requested changes to a settings value.
///
/// The algorithm identifier is validated against the cipher registry
/// before anything is persisted, so a typo can never leave the tool
/// unable to start.
fn apply(
    mut settings: Settings,
    encryption: Option<&str>,
    secrets_file: Option<&Path>,
) -> Result<Settings> {
    if encryption.is_none() && secrets_file.is_none() {
        return Err(RuneError::CommandFailed(
            "specify at least one option to configure (--encryption, --secrets-file)".into(),
        ));
    }

    if let Some(algorithm) = encryption {
        Cipher::resolve(algorithm)?;
        settings.encryption = algorithm.to_string();
    }

    if let Some(path) = secrets_file {
        settings.secrets_file = path.to_path_buf();
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn no_options_is_an_error() {
        let result = apply(Settings::default(), None, None);
        assert!(matches!(result, Err(RuneError::CommandFailed(_))));
    }

    #[test]
    fn unknown_algorithm_is_rejected_before_persisting() {
        let result = apply(Settings::default(), Some("rot13"), None);
        assert!(matches!(result, Err(RuneError::UnsupportedAlgorithm(_))));
    }

    #[test]
    fn changes_both_fields() {
        let updated = apply(
            Settings::default(),
            Some("no-encryption"),
            Some(Path::new("/tmp/v.json")),
        )
        .unwrap();

        assert_eq!(updated.encryption, "no-encryption");
        assert_eq!(updated.secrets_file, PathBuf::from("/tmp/v.json"));
    }

    #[test]
    fn untouched_fields_are_preserved() {
        let updated = apply(Settings::default(), Some("no-encryption"), None).unwrap();

        assert_eq!(updated.encryption, "no-encryption");
        assert_eq!(updated.secrets_file, Settings::default().secrets_file);
    }
}
