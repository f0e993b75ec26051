//! Integration tests for the high-level vault operations.

use std::collections::BTreeMap;
use std::path::Path;

use rune_vault::config::Settings;
use rune_vault::crypto::Cipher;
use rune_vault::errors::RuneError;
use rune_vault::vault::SecretVault;
use tempfile::TempDir;

/// Helper: an initialized vault over a temp file, using the given
/// cipher for new fields.
fn open_vault(dir: &TempDir, cipher: Cipher) -> SecretVault {
    let vault = SecretVault::with_parts(&dir.path().join("secrets.json"), cipher);
    vault.store().ensure_exists().expect("init vault file");
    vault
}

/// Helper: build a field map from pairs.
fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ---------------------------------------------------------------------------
// Add / Get
// ---------------------------------------------------------------------------

#[test]
fn add_then_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("user", "a"), ("pass", "b")]), "k1")
        .unwrap();

    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["user"], "a");
    assert_eq!(got["pass"], "b");
}

#[test]
fn duplicate_add_is_rejected_and_first_record_survives() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("pass", "original")]), "k1")
        .unwrap();

    let result = vault.add("prod", "db", &fields(&[("pass", "usurper")]), "k1");
    assert!(matches!(result, Err(RuneError::AlreadyExists(_))));

    // The stored record still holds the first call's fields.
    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["pass"], "original");
}

#[test]
fn get_missing_record_is_not_found() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    let result = vault.get("nope", "", "any-key");
    assert!(matches!(result, Err(RuneError::NotFound(_))));
}

#[test]
fn get_with_wrong_key_fails_without_partial_results() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("user", "a"), ("pass", "b")]), "k1")
        .unwrap();

    let result = vault.get("prod", "db", "k2");
    assert!(matches!(result, Err(RuneError::WrongKey)));
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn partial_update_merges_fields() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("user", "a"), ("pass", "b")]), "k1")
        .unwrap();

    let updated = vault
        .update("prod", "db", &fields(&[("pass", "c")]), "k1")
        .unwrap();
    assert_eq!(updated.version, 2);

    // `pass` replaced, `user` kept its old encrypted value.
    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["user"], "a");
    assert_eq!(got["pass"], "c");
}

#[test]
fn update_adds_new_field_names() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("user", "a")]), "k1")
        .unwrap();
    vault
        .update("prod", "db", &fields(&[("host", "db.internal")]), "k1")
        .unwrap();

    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got.len(), 2);
    assert_eq!(got["user"], "a");
    assert_eq!(got["host"], "db.internal");
}

#[test]
fn update_with_wrong_key_leaves_record_untouched() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault
        .add("prod", "db", &fields(&[("pass", "b")]), "k1")
        .unwrap();

    let result = vault.update("prod", "db", &fields(&[("pass", "evil")]), "k2");
    assert!(matches!(result, Err(RuneError::WrongKey)));

    // Nothing was written — the original key still decrypts everything.
    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["pass"], "b");
}

#[test]
fn update_missing_record_is_not_found() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    let result = vault.update("nope", "", &fields(&[("a", "b")]), "k1");
    assert!(matches!(result, Err(RuneError::NotFound(_))));
}

#[test]
fn update_refreshes_record_algorithm_but_not_old_field_tags() {
    let dir = TempDir::new().unwrap();

    // Write the record under the passthrough strategy...
    let plain_vault = open_vault(&dir, Cipher::Passthrough);
    plain_vault
        .add("prod", "db", &fields(&[("user", "a")]), "k1")
        .unwrap();

    // ...then update it through a vault configured for AES-GCM.
    let aes_vault =
        SecretVault::with_parts(&dir.path().join("secrets.json"), Cipher::AesGcm);
    aes_vault
        .update("prod", "db", &fields(&[("pass", "b")]), "k1")
        .unwrap();

    // The record-level algorithm reflects the most recent write, while
    // the untouched field keeps its original per-field tag.
    let record = aes_vault.store().find("prod", "db").unwrap().unwrap();
    assert_eq!(record.algorithm, "aesgcm");
    assert_eq!(record.fields["user"].algorithm, "no-encryption");
    assert_eq!(record.fields["pass"].algorithm, "aesgcm");

    // Mixed-algorithm records decrypt field by field.
    let got = aes_vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["user"], "a");
    assert_eq!(got["pass"], "b");
}

// ---------------------------------------------------------------------------
// Delete / List
// ---------------------------------------------------------------------------

#[test]
fn delete_then_get_is_not_found() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::Passthrough);

    vault
        .add("prod", "db", &fields(&[("pass", "b")]), "k1")
        .unwrap();
    vault.delete("prod", "db").unwrap();

    let result = vault.get("prod", "db", "k1");
    assert!(matches!(result, Err(RuneError::NotFound(_))));

    // Deleting again also fails.
    let result = vault.delete("prod", "db");
    assert!(matches!(result, Err(RuneError::NotFound(_))));
}

#[test]
fn same_name_in_different_namespaces_coexists() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::Passthrough);

    vault
        .add("prod", "db", &fields(&[("which", "database")]), "k")
        .unwrap();
    vault
        .add("prod", "staging", &fields(&[("which", "staging")]), "k")
        .unwrap();

    assert_eq!(vault.get("prod", "db", "k").unwrap()["which"], "database");
    assert_eq!(
        vault.get("prod", "staging", "k").unwrap()["which"],
        "staging"
    );

    // Deleting one leaves the other.
    vault.delete("prod", "db").unwrap();
    assert!(vault.get("prod", "staging", "k").is_ok());
}

#[test]
fn list_of_empty_vault_is_empty_not_an_error() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::Passthrough);

    assert!(vault.list().unwrap().is_empty());
}

#[test]
fn list_returns_all_records_without_decrypting() {
    let dir = TempDir::new().unwrap();
    let vault = open_vault(&dir, Cipher::AesGcm);

    vault.add("prod", "db", &fields(&[("p", "1")]), "k1").unwrap();
    vault.add("api-key", "", &fields(&[("t", "2")]), "k2").unwrap();

    // No key needed — list never touches ciphertext.
    let records = vault.list().unwrap();
    assert_eq!(records.len(), 2);
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[test]
fn opening_with_an_unknown_algorithm_fails() {
    let dir = TempDir::new().unwrap();
    let settings = Settings {
        encryption: "rot13".to_string(),
        secrets_file: dir.path().join("secrets.json"),
    };

    let result = SecretVault::open(&settings);
    assert!(matches!(result, Err(RuneError::UnsupportedAlgorithm(_))));
}

#[test]
fn vault_survives_reopening() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("secrets.json");

    {
        let vault = SecretVault::with_parts(&path, Cipher::AesGcm);
        vault.store().ensure_exists().unwrap();
        vault
            .add("prod", "db", &fields(&[("pass", "b")]), "k1")
            .unwrap();
    }

    // A fresh handle over the same file sees the same data.
    let vault = SecretVault::with_parts(Path::new(&path), Cipher::AesGcm);
    let got = vault.get("prod", "db", "k1").unwrap();
    assert_eq!(got["pass"], "b");
}
