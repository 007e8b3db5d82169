//! Error types for the rule engine.

use veritas_core::CoreError;

/// Errors that can occur during rule-engine operations.
///
/// Every variant is raised before any state is touched, so a rejected action
/// leaves the character or threat exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MechError {
    /// The action breaks a rule (overspent budget, attribute out of bounds,
    /// wrong level-up step).
    #[error("{0}")]
    Validation(String),

    /// Not enough ammunition or energy to perform the action.
    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResource {
        /// Player-facing name of the resource.
        resource: String,
        /// Amount the action costs.
        required: i32,
        /// Amount currently available.
        available: i32,
    },

    /// A skill, item, ability, or attack does not exist on the record.
    #[error("not found: {0}")]
    NotFound(String),

    /// A core value failed validation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl MechError {
    /// Shorthand for [`MechError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Convenience result type for rule-engine operations.
pub type MechResult<T> = Result<T, MechError>;
