use thiserror::Error;

/// Failure of a host key-value store. Never shown to the user; callers log
/// it and fall back.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("preference storage is unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read preference '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write preference '{key}': {reason}")]
    Write { key: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown theme mode '{0}' (expected 'light' or 'dark')")]
pub struct ParseModeError(pub String);
