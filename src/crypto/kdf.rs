//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The passphrase the user types is stretched into a 256-bit AES key
//! with a random per-field salt and a deliberately expensive iteration
//! count, so an attacker with the vault file cannot cheaply brute-force
//! short keys.  The few hundred milliseconds this costs per operation
//! is intentional.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

/// Length of the per-field salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.  Tunable, but must stay in the
/// "deliberately expensive" range.
pub const PBKDF2_ITERATIONS: u32 = 600_000;

/// Derive a 32-byte encryption key from a passphrase and salt.
///
/// The same passphrase + salt always produces the same key.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key);
    key
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
