//! Error types for the crate.
//!
//! Every protocol operation returns [`Result`]. Input problems are reported as
//! [`Error::InvalidInput`] before any group arithmetic takes place, a fully
//! revoked identity is reported as [`Error::Revoked`], and anything raised by
//! the pairing backend is wrapped in [`Error::Backend`].

use ark_serialize::SerializationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by `setup`, `key_gen`, `encrypt` and `decrypt`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    /// The identity equals the revoked pattern on every fixed position (`d = 0`).
    #[error("identity is revoked by the subset descriptor")]
    Revoked,
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
}

impl Error {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    pub fn is_revoked(&self) -> bool {
        matches!(self, Error::Revoked)
    }
}

impl From<SerializationError> for Error {
    fn from(e: SerializationError) -> Self {
        Error::Backend(BackendError::Serialization(e))
    }
}

/// Rejections of identities, patterns and lengths.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("identity length must be at least 1")]
    ZeroLength,
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{what} contains {character:?} at position {position}")]
    InvalidCharacter {
        what: &'static str,
        position: usize,
        character: char,
    },
}

/// Failures surfaced by the group backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("serialization failure: {0}")]
    Serialization(SerializationError),
    #[error("scalar {0} has no inverse in the scalar field")]
    NonInvertible(u64),
}
