//! Error types for the session layer.

use thiserror::Error;
use veritas_core::CoreError;
use veritas_mechanics::MechError;

use crate::ports::Collection;

/// Result type for session operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur during a table session.
#[derive(Debug, Error)]
pub enum TableError {
    /// Registration with a username that is already taken.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Registration with an email that is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// The record does not exist (stale or deleted id).
    #[error("{collection} record {id} not found")]
    NotFound {
        /// Where the record was looked up.
        collection: Collection,
        /// The missing id.
        id: String,
    },

    /// The action needs a signed-in user.
    #[error("no user is signed in")]
    NotSignedIn,

    /// Login identifier or secret did not match.
    #[error("unknown user or wrong password")]
    InvalidCredentials,

    /// The request breaks a table rule.
    #[error("{0}")]
    Validation(String),

    /// Rule-engine error.
    #[error(transparent)]
    Mechanics(#[from] MechError),

    /// Core validation error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(String),
}
