//! Field-level encryption strategies.
//!
//! Every encrypted field carries the identifier of the algorithm that
//! produced it, and is only ever decrypted by the matching strategy.
//! This keeps records with fields written under different configured
//! algorithms decryptable forever: the per-field tag is authoritative,
//! the configured algorithm only decides how *new* fields are written.

use std::collections::BTreeMap;

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::crypto::kdf;
use crate::errors::{Result, RuneError};

/// Identifier of the passthrough (no-op) strategy.
pub const NO_ENCRYPTION: &str = "no-encryption";

/// Identifier of the AES-256-GCM strategy.
pub const AES_GCM: &str = "aesgcm";

/// Schema version written into new fields.
const FIELD_VERSION: u32 = 1;

fn default_field_version() -> u32 {
    FIELD_VERSION
}

/// One encrypted value inside a secret record.
///
/// All binary components are base64 strings so the vault file stays a
/// plain JSON document.  `nonce`/`tag`/`salt` are `None` for the
/// passthrough strategy; the AES-GCM strategy keeps the auth tag
/// appended to the ciphertext, so `tag` stays `None` there too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedField {
    pub ciphertext: String,
    pub nonce: Option<String>,
    pub tag: Option<String>,
    pub salt: Option<String>,

    /// Which strategy produced this field.  Checked before every
    /// decryption attempt.
    pub algorithm: String,

    /// Algorithm-specific extension values (e.g. a future KDF
    /// iteration count).  Empty today; kept so the schema can grow
    /// without a migration.
    #[serde(default)]
    pub params: BTreeMap<String, String>,

    /// Schema version of the field structure itself.
    #[serde(default = "default_field_version")]
    pub version: u32,
}

/// A field-level encryption strategy.
///
/// The two variants form a closed set; `resolve` maps stored algorithm
/// identifiers back to the strategy that understands them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    /// Deliberate "do nothing" mode — the key is accepted but ignored.
    Passthrough,
    /// Password-based AES-256-GCM with a per-field random salt and nonce.
    AesGcm,
}

impl Cipher {
    /// The identifier written into fields this strategy encrypts.
    pub fn algorithm_id(&self) -> &'static str {
        match self {
            Cipher::Passthrough => NO_ENCRYPTION,
            Cipher::AesGcm => AES_GCM,
        }
    }

    /// Resolve an algorithm identifier to its strategy.
    ///
    /// Exact string match only; anything else (including an empty or
    /// unset identifier) is `UnsupportedAlgorithm`.
    pub fn resolve(algorithm: &str) -> Result<Self> {
        match algorithm {
            NO_ENCRYPTION => Ok(Cipher::Passthrough),
            AES_GCM => Ok(Cipher::AesGcm),
            other => Err(RuneError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    /// Encrypt a plaintext value into a self-describing field.
    pub fn encrypt(&self, plaintext: &str, key: &str) -> Result<EncryptedField> {
        match self {
            Cipher::Passthrough => Ok(EncryptedField {
                ciphertext: plaintext.to_string(),
                nonce: None,
                tag: None,
                salt: None,
                algorithm: NO_ENCRYPTION.to_string(),
                params: BTreeMap::new(),
                version: FIELD_VERSION,
            }),
            Cipher::AesGcm => encrypt_aesgcm(plaintext, key),
        }
    }

    /// Decrypt a field previously produced by `encrypt`.
    ///
    /// Fails with `AlgorithmMismatch` if the field's stored algorithm
    /// does not match this strategy, and with `WrongKey` for every
    /// other failure — wrong key, tampered ciphertext, and corrupt
    /// encodings are indistinguishable on purpose.
    pub fn decrypt(&self, field: &EncryptedField, key: &str) -> Result<String> {
        if field.algorithm != self.algorithm_id() {
            return Err(RuneError::AlgorithmMismatch(field.algorithm.clone()));
        }

        match self {
            Cipher::Passthrough => Ok(field.ciphertext.clone()),
            Cipher::AesGcm => decrypt_aesgcm(field, key),
        }
    }
}

/// AES-256-GCM encryption with a password-derived key.
///
/// A fresh salt and nonce come from the OS random source on every call;
/// reusing a nonce under the same derived key would break GCM, so they
/// are never cached or passed in.
fn encrypt_aesgcm(plaintext: &str, key: &str) -> Result<EncryptedField> {
    let salt = kdf::generate_salt();
    let mut key_bytes = kdf::derive_key(key, &salt);

    let cipher = Aes256Gcm::new_from_slice(&key_bytes)
        .map_err(|e| RuneError::EncryptionFailed(format!("invalid key length: {e}")))?;
    key_bytes.zeroize();

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    // The 16-byte auth tag is appended to the ciphertext.
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_bytes())
        .map_err(|e| RuneError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(EncryptedField {
        ciphertext: BASE64.encode(&ciphertext),
        nonce: Some(BASE64.encode(nonce)),
        tag: None,
        salt: Some(BASE64.encode(salt)),
        algorithm: AES_GCM.to_string(),
        params: BTreeMap::new(),
        version: FIELD_VERSION,
    })
}

fn decrypt_aesgcm(field: &EncryptedField, key: &str) -> Result<String> {
    // A missing or undecodable salt/nonce means the field cannot have
    // been produced by this strategy with this key.  Collapse every
    // such case into WrongKey.
    let salt = decode_b64(field.salt.as_deref())?;
    let nonce_bytes = decode_b64(field.nonce.as_deref())?;
    let ciphertext = decode_b64(Some(&field.ciphertext))?;

    if nonce_bytes.len() != 12 {
        return Err(RuneError::WrongKey);
    }

    let mut key_bytes = kdf::derive_key(key, &salt);
    let cipher = Aes256Gcm::new_from_slice(&key_bytes).map_err(|_| RuneError::WrongKey)?;
    key_bytes.zeroize();

    let nonce = Nonce::from_slice(&nonce_bytes);
    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| RuneError::WrongKey)?;

    String::from_utf8(plaintext).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        RuneError::WrongKey
    })
}

fn decode_b64(value: Option<&str>) -> Result<Vec<u8>> {
    let value = value.ok_or(RuneError::WrongKey)?;
    BASE64.decode(value).map_err(|_| RuneError::WrongKey)
}
