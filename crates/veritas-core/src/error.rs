use std::fmt;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when a value falls outside its domain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// An enumerated value (threat level, training tier, hit bonus) is out of range.
    #[error("invalid {field}: {value}")]
    InvalidValue {
        /// The field being converted.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },

    /// A dice formula does not have the shape `<count>d<sides>`.
    #[error("invalid dice formula: \"{0}\"")]
    InvalidFormula(String),
}

impl CoreError {
    /// Build an [`CoreError::InvalidValue`] from any displayable value.
    pub fn invalid(field: &'static str, value: impl fmt::Display) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}
