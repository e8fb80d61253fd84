//! Error types for RingKV.

use std::fmt;

/// The main error type for RingKV operations.
///
/// The storage contract is designed to not fail under normal use: a missing
/// key is reported through `has` returning `false` and `get` returning
/// `None`, never through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A lock was poisoned (internal error)
    LockPoisoned,

    /// A key was malformed (empty keys are rejected)
    InvalidKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockPoisoned => write!(f, "Lock poisoned"),
            Error::InvalidKey => write!(f, "Invalid key: keys must be non-empty"),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for RingKV operations.
pub type Result<T> = std::result::Result<T, Error>;
