//! The declared calling convention of a validated function: its
//! parameters, their annotations and defaults, and how call-site
//! arguments bind to them.

pub use self::annotation::Annotation;
pub use self::bind::{Arguments, BoundArguments};
pub use self::error::{BindError, SignatureError};
pub use self::parameter::{Parameter, ParameterKind, Signature};
pub use self::value::Value;

// --- MODULE DECLARATIONS ---
mod annotation;
mod bind;
mod error;
mod parameter;
mod value;
