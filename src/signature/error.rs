//! Defines the error types for the signature module.
use thiserror::Error;

/// A structurally invalid signature, detected when a validator is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("duplicate parameter '{name}' in function '{function}'")]
    DuplicateParameter { function: String, name: String },
    /// Parameter kinds must appear in the order positional-only,
    /// positional-or-keyword, `*args`, keyword-only, `**kwargs`.
    #[error("parameter '{name}' of function '{function}' is out of order")]
    OutOfOrder { function: String, name: String },
    #[error("non-default parameter '{name}' follows default parameter in function '{function}'")]
    NonDefaultAfterDefault { function: String, name: String },
    #[error("variadic parameter '{name}' of function '{function}' cannot have a default")]
    VariadicDefault { function: String, name: String },
}

/// Arguments that do not fit the signature they are bound to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    TooManyPositional {
        function: String,
        expected: usize,
        given: usize,
    },
    #[error("{function}() got an unexpected keyword argument '{name}'")]
    UnexpectedKeyword { function: String, name: String },
    #[error("{function}() got multiple values for argument '{name}'")]
    MultipleValues { function: String, name: String },
    #[error("{function}() missing required argument: '{name}'")]
    Missing { function: String, name: String },
}
