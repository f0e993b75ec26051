//! High-level vault operations used by CLI commands.
//!
//! `SecretVault` ties the cipher registry and the store together so
//! the rest of the application can work with simple calls like
//! `vault.add("prod", "db", &fields, key)`.  The configured cipher is
//! resolved once at construction and threaded through — it is never
//! re-read from disk per call.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Settings;
use crate::crypto::{Cipher, EncryptedField};
use crate::errors::{Result, RuneError};

use super::secret::SecretRecord;
use super::store::VaultStore;

/// The main vault handle.
pub struct SecretVault {
    store: VaultStore,
    /// Strategy for *new* fields.  Decryption always goes by each
    /// field's own stored algorithm tag instead.
    cipher: Cipher,
}

impl SecretVault {
    /// Build a vault from the loaded settings.
    ///
    /// Fails with `UnsupportedAlgorithm` if the configured algorithm
    /// identifier is unknown.
    pub fn open(settings: &Settings) -> Result<Self> {
        let cipher = Cipher::resolve(&settings.encryption)?;
        Ok(Self {
            store: VaultStore::new(&settings.secrets_file),
            cipher,
        })
    }

    /// Build a vault from explicit parts (used by tests).
    pub fn with_parts(path: &Path, cipher: Cipher) -> Self {
        Self {
            store: VaultStore::new(path),
            cipher,
        }
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Encrypt `fields` with the configured cipher and store them as a
    /// new record.
    ///
    /// Fails with `AlreadyExists` if the full name is taken.  All
    /// fields are encrypted before anything touches the store, so a
    /// failed encryption never leaves a partial record behind.
    pub fn add(
        &self,
        name: &str,
        namespace: &str,
        fields: &BTreeMap<String, String>,
        key: &str,
    ) -> Result<SecretRecord> {
        if self.store.find(name, namespace)?.is_some() {
            return Err(RuneError::AlreadyExists(SecretRecord::full_name_of(
                name, namespace,
            )));
        }

        let encrypted = self.encrypt_fields(fields, key)?;
        let record = SecretRecord::new(name, namespace, encrypted, self.cipher.algorithm_id());

        self.store.insert_or_replace(record.clone())?;
        Ok(record)
    }

    /// Decrypt and return every field of a record.
    ///
    /// Each field is decrypted by the strategy named in its own
    /// algorithm tag, not the configured one.  Any single field
    /// failing aborts the whole retrieval — partial results are never
    /// returned.
    pub fn get(
        &self,
        name: &str,
        namespace: &str,
        key: &str,
    ) -> Result<BTreeMap<String, String>> {
        let record = self.store.find(name, namespace)?.ok_or_else(|| {
            RuneError::NotFound(SecretRecord::full_name_of(name, namespace))
        })?;

        decrypt_fields(&record, key)
    }

    /// Re-encrypt `fields` and merge them into an existing record.
    ///
    /// Fails with `NotFound` if absent.  All existing fields are
    /// decrypted first as a key-correctness check: a wrong key is
    /// rejected before any new ciphertext is written, so a record can
    /// never end up with fields under two different keys.
    ///
    /// Merge policy: incoming field names replace their old values,
    /// names absent from the incoming set keep their old encrypted
    /// value untouched, and new names are added.  The record-level
    /// algorithm is refreshed to the configured one — older fields
    /// inside may still carry a different per-field tag, which remains
    /// the source of truth for decryption.
    pub fn update(
        &self,
        name: &str,
        namespace: &str,
        fields: &BTreeMap<String, String>,
        key: &str,
    ) -> Result<SecretRecord> {
        let existing = self.store.find(name, namespace)?.ok_or_else(|| {
            RuneError::NotFound(SecretRecord::full_name_of(name, namespace))
        })?;

        // Key-correctness check over the untouched fields.
        decrypt_fields(&existing, key)?;

        let mut merged = existing.fields.clone();
        for (field_name, encrypted) in self.encrypt_fields(fields, key)? {
            merged.insert(field_name, encrypted);
        }

        let updated = existing.with_fields(merged, self.cipher.algorithm_id());
        self.store.insert_or_replace(updated.clone())?;
        Ok(updated)
    }

    /// Remove a record.  Fails with `NotFound` if absent.
    pub fn delete(&self, name: &str, namespace: &str) -> Result<()> {
        if !self.store.remove(name, namespace)? {
            return Err(RuneError::NotFound(SecretRecord::full_name_of(
                name, namespace,
            )));
        }
        Ok(())
    }

    /// Full snapshot of all records.  An empty vault is an empty list,
    /// not an error.
    pub fn list(&self) -> Result<Vec<SecretRecord>> {
        self.store.list_all()
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn encrypt_fields(
        &self,
        fields: &BTreeMap<String, String>,
        key: &str,
    ) -> Result<BTreeMap<String, EncryptedField>> {
        fields
            .iter()
            .map(|(name, value)| Ok((name.clone(), self.cipher.encrypt(value, key)?)))
            .collect()
    }
}

/// Decrypt every field of a record, dispatching on each field's own
/// stored algorithm tag.
fn decrypt_fields(record: &SecretRecord, key: &str) -> Result<BTreeMap<String, String>> {
    record
        .fields
        .iter()
        .map(|(name, field)| {
            let cipher = Cipher::resolve(&field.algorithm)?;
            Ok((name.clone(), cipher.decrypt(field, key)?))
        })
        .collect()
}
