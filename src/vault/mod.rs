//! Vault module — encrypted secret storage.
//!
//! This module provides:
//! - The `SecretRecord` entity (`secret`)
//! - JSON-file persistence with atomic rewrites (`store`)
//! - The high-level `SecretVault` operations (`ops`)

pub mod ops;
pub mod secret;
pub mod store;

// Re-export the most commonly used items.
pub use ops::SecretVault;
pub use secret::SecretRecord;
pub use store::VaultStore;
