//! # Error types
//!
//! Crate-wide error enum for the LSM key-value store.
//!
//! Every public operation on [`StoreError`]'s consumers returns
//! `Result<_, StoreError>` rather than an opaque boxed error, so callers can
//! branch on failure kind instead of string-matching a message. `NotFound`
//! is deliberately absent: the read and delete paths represent "absent" as
//! `Option::None`, not as an error (see the core crate's read path).

use std::path::PathBuf;

/// Why a key or value was rejected at the public write/delete surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInputReason {
    /// The key or value was empty.
    Empty,
    /// The key or value exceeded its configured maximum length.
    TooLong,
    /// The key or value contained a space (0x20), which the on-disk format
    /// uses as the key/value delimiter.
    ContainsSpace,
    /// The key or value contained a newline (0x0A), which the on-disk format
    /// uses as the record terminator.
    ContainsNewline,
}

impl std::fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            InvalidInputReason::Empty => "must not be empty",
            InvalidInputReason::TooLong => "exceeds the configured maximum length",
            InvalidInputReason::ContainsSpace => "must not contain a space (0x20)",
            InvalidInputReason::ContainsNewline => "must not contain a newline (0x0A)",
        };
        f.write_str(msg)
    }
}

/// Which field of a write/delete call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key,
    Value,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Key => "key",
            Field::Value => "value",
        })
    }
}

/// The crate-wide error type returned by every fallible public operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A key or value violated a length or charset rule. State is unchanged.
    #[error("invalid {field}: {reason}")]
    InvalidInput {
        field: Field,
        reason: InvalidInputReason,
    },

    /// A filesystem operation failed (open/read/write/rename/remove).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An on-disk record could not be parsed and was skipped.
    #[error("corrupt record in {path}: {reason}")]
    Corruption { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn corruption(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
