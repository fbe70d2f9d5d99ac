use argon2::password_hash::rand_core;
use thiserror::Error;

use crate::argon2::primitive::Status;

/// Error type for hashing and verification operations.
///
/// A verification mismatch is not an error: `verify` returns `Ok(false)` for it.
#[derive(Debug, Error)]
pub enum HasherError {
    #[error("empty input specified")]
    EmptyInput,

    #[error("empty hash specified")]
    EmptyHash,

    #[error("instance is not configured properly")]
    NotConfigured,

    #[error("invalid argon2 variant")]
    InvalidVariant,

    #[error(transparent)]
    RandomSource(rand_core::Error),

    #[error("{message}")]
    Primitive { status: Status, message: String },
}

impl HasherError {
    /// Status reported by the primitive, if this error came from it.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::Primitive { status, .. } => Some(*status),
            _ => None,
        }
    }
}
