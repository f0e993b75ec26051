use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Rune.
#[derive(Debug, Error)]
pub enum RuneError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong key, corrupted ciphertext, and failed authentication all
    /// collapse into this one variant so callers cannot tell *why*
    /// decryption failed.
    #[error("Invalid key or corrupted secret")]
    WrongKey,

    #[error("Secret was encrypted with algorithm '{0}' — use it to decrypt")]
    AlgorithmMismatch(String),

    #[error("Unsupported encryption algorithm '{0}'")]
    UnsupportedAlgorithm(String),

    // --- Store errors ---
    #[error("Vault file at {path} is unavailable: {reason}")]
    StoreUnavailable { path: PathBuf, reason: String },

    #[error("Could not persist vault file: {0}")]
    PersistFailure(String),

    // --- Record errors ---
    #[error("Secret '{0}' already exists (use `rune update` to change it)")]
    AlreadyExists(String),

    #[error("Secret '{0}' does not exist")]
    NotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for Rune results.
pub type Result<T> = std::result::Result<T, RuneError>;
