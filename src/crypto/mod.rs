//! Cryptographic primitives for Rune.
//!
//! This module provides:
//! - The field-level cipher strategies and their registry (`cipher`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)

pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{Cipher, EncryptedField, ...};
pub use cipher::{Cipher, EncryptedField, AES_GCM, NO_ENCRYPTION};
pub use kdf::{derive_key, generate_salt};
