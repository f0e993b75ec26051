//! The persistent secret record.
//!
//! A `SecretRecord` is one named secret: a namespace/name pair, a map
//! of field name -> encrypted field, free-form tags and metadata, and
//! version/timestamp bookkeeping.  Records are never mutated in place —
//! updates go through `with_fields`, which derives a fresh copy.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crypto::EncryptedField;

/// One named secret stored in the vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretRecord {
    /// Opaque unique identifier, assigned once at creation and stable
    /// across updates.  The vault file is keyed by this.
    pub id: Uuid,

    /// The secret's name (e.g. "my-production-database").
    pub name: String,

    /// Hierarchical grouping prefix; the empty string is the root
    /// namespace.
    pub namespace: String,

    /// Field name -> encrypted value.  Each field is one credential
    /// component ("host", "password", ...).
    pub fields: BTreeMap<String, EncryptedField>,

    /// The algorithm used for the most recent write of new fields.
    /// Informational only — each field's own tag drives decryption,
    /// so a record may hold fields from several algorithms.
    pub algorithm: String,

    /// Free-form, unvalidated labels.
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Free-form, unvalidated key/value annotations.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,

    /// When this record was first created.  Preserved by updates.
    pub created_at: DateTime<Utc>,

    /// When this record was last updated.
    pub updated_at: DateTime<Utc>,

    /// Bumped on every derived copy.
    pub version: u32,
}

impl SecretRecord {
    /// Create a brand-new record with a fresh id, both timestamps set
    /// to now, and version 1.
    pub fn new(
        name: &str,
        namespace: &str,
        fields: BTreeMap<String, EncryptedField>,
        algorithm: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            namespace: namespace.to_string(),
            fields,
            algorithm: algorithm.to_string(),
            tags: BTreeSet::new(),
            metadata: BTreeMap::new(),
            created_at: now,
            updated_at: now,
            version: 1,
        }
    }

    /// The unique lookup key: `namespace + "/" + name`, or just `name`
    /// when the namespace is empty.
    pub fn full_name(&self) -> String {
        Self::full_name_of(&self.name, &self.namespace)
    }

    /// Build a full name without a record at hand.
    pub fn full_name_of(name: &str, namespace: &str) -> String {
        if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}/{name}")
        }
    }

    /// Derive an updated copy with replaced fields.
    ///
    /// `id` and `created_at` carry over unconditionally, `updated_at`
    /// is refreshed, and `version` is bumped.  `self` is untouched.
    pub fn with_fields(
        &self,
        fields: BTreeMap<String, EncryptedField>,
        algorithm: &str,
    ) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            fields,
            algorithm: algorithm.to_string(),
            tags: self.tags.clone(),
            metadata: self.metadata.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
            version: self.version + 1,
        }
    }
}
