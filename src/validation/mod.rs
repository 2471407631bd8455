//! Call-time unit validation.
//!
//! A `QuantityInput` resolves a signature's annotations into `Constraint`s
//! once, then the `ValidatedFn` it returns checks every call against them:
//! arguments before the function runs, the return value after.

pub use self::constraint::{Constraint, Target};
pub use self::error::{CallError, CallErrorKind, DefinitionError};
pub use self::validator::{quantity_input, QuantityInput, ValidatedFn};

// --- MODULE DECLARATIONS ---
mod constraint;
mod error;
mod validator;
mod rules {
    pub mod arguments;
    pub mod returns;
}
