//! Namespace-aware persistence over the vault file.
//!
//! The whole collection lives in a single JSON document keyed by record
//! id; lookups go through an in-memory projection keyed by full name.
//! Every mutating call is a full read-modify-write of the file — load
//! the entire document, change the in-memory collection, rewrite
//! everything.  That is simple and correct for a single-process tool,
//! but it means exactly one process may use a vault file at a time:
//! two concurrent writers race on the rewrite and the last one wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Result, RuneError};

use super::secret::SecretRecord;

/// The on-disk collection, keyed by record id.
type Records = BTreeMap<String, SecretRecord>;

/// Handle to a vault file.  Owns the on-disk representation — no other
/// component opens the file directly.
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty vault file (and its parent directory) if none
    /// exists yet.  Called once at CLI startup; the store itself treats
    /// a missing file as `StoreUnavailable`.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, "{}")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collection operations
    // ------------------------------------------------------------------

    /// Look up a record by its exact full name.
    ///
    /// `Ok(None)` means "no such record" — distinct from the `Err`
    /// cases where the backing file cannot be read at all.
    pub fn find(&self, name: &str, namespace: &str) -> Result<Option<SecretRecord>> {
        let records = self.load()?;
        let full_name = SecretRecord::full_name_of(name, namespace);
        Ok(records
            .into_values()
            .find(|r| r.full_name() == full_name))
    }

    /// Insert a record, replacing any existing record with the same
    /// full name, and rewrite the file.
    pub fn insert_or_replace(&self, record: SecretRecord) -> Result<()> {
        let mut records = self.load()?;

        // A replacement may carry a different id than the record it
        // displaces; drop the old entry so the full name stays unique.
        let full_name = record.full_name();
        records.retain(|_, r| r.full_name() != full_name);
        records.insert(record.id.to_string(), record);

        self.persist(&records)
    }

    /// Remove the record with the given full name and rewrite the file.
    ///
    /// Returns `false` if no matching record existed (a no-op, not an
    /// error — callers wanting `NotFound` check `find` first).
    pub fn remove(&self, name: &str, namespace: &str) -> Result<bool> {
        let mut records = self.load()?;
        let full_name = SecretRecord::full_name_of(name, namespace);

        let before = records.len();
        records.retain(|_, r| r.full_name() != full_name);
        if records.len() == before {
            return Ok(false);
        }

        self.persist(&records)?;
        Ok(true)
    }

    /// Full snapshot of every record, in stored (id) order.
    pub fn list_all(&self) -> Result<Vec<SecretRecord>> {
        Ok(self.load()?.into_values().collect())
    }

    // ------------------------------------------------------------------
    // File access
    // ------------------------------------------------------------------

    /// Load and parse the entire vault file.
    fn load(&self) -> Result<Records> {
        let data = fs::read_to_string(&self.path).map_err(|e| RuneError::StoreUnavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&data).map_err(|e| RuneError::StoreUnavailable {
            path: self.path.clone(),
            reason: format!("invalid vault JSON: {e}"),
        })
    }

    /// Serialize the collection and rewrite the vault file atomically.
    ///
    /// Writes to a temp file in the same directory and renames it over
    /// the target, so a crash mid-write never leaves a truncated vault.
    fn persist(&self, records: &Records) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| RuneError::SerializationError(e.to_string()))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, json).map_err(|e| RuneError::PersistFailure(e.to_string()))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| RuneError::PersistFailure(e.to_string()))?;

        Ok(())
    }
}
