//! Defines the error types for the validation module.
use crate::signature::{BindError, SignatureError};
use crate::units::UnitsError;
use thiserror::Error;

/// Raised when the validator is applied, before any call happens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// A malformed `Quantity[...]` annotation or a string that names no
    /// physical type.
    #[error("target is not a Unit or a relevant physical type: {target}")]
    InvalidTarget { target: String },
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// The category of a call error.
///
// Lets callers branch on the failure without matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallErrorKind {
    /// A value that must carry a unit has none.
    Type,
    /// A unit that cannot be converted to what is required.
    Units,
    /// Arguments that do not fit the signature.
    Binding,
    /// The wrapped function itself failed.
    Body,
}

/// Raised while calling a validated function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    #[error("Argument '{argument}' to function '{function}' has no 'unit' attribute. You should pass in an astropy Quantity instead.")]
    NotAQuantity { argument: String, function: String },
    #[error("Argument '{argument}' to function '{function}' must be in units convertible to '{target}'.")]
    IncompatibleUnits {
        argument: String,
        function: String,
        target: String,
    },
    #[error(transparent)]
    Bind(#[from] BindError),
    /// Unit arithmetic failed, inside the body or while converting its result.
    #[error(transparent)]
    Units(#[from] UnitsError),
    #[error("{0}")]
    Body(String),
}

impl CallError {
    /// A failure raised by the wrapped function's own logic.
    pub fn body(message: impl Into<String>) -> Self {
        CallError::Body(message.into())
    }

    pub fn kind(&self) -> CallErrorKind {
        match self {
            CallError::NotAQuantity { .. } => CallErrorKind::Type,
            CallError::IncompatibleUnits { .. } | CallError::Units(_) => CallErrorKind::Units,
            CallError::Bind(_) => CallErrorKind::Binding,
            CallError::Body(_) => CallErrorKind::Body,
        }
    }
}
