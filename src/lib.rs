//! Unit-checked function calls.
//!
//! Describe a function with a [`Signature`] whose parameters are annotated
//! with units or physical types, wrap its body with [`quantity_input`] or a
//! configured [`QuantityInput`], and every call through the resulting
//! [`ValidatedFn`] rejects arguments that are not convertible to what was
//! declared.
//!
//! ```ignore
//! use quantity_input::{quantity_input, unit, Arguments, Parameter, Signature, Value};
//!
//! let sig = Signature::new("distance")
//!     .param(Parameter::new("d").annotated("length"))
//!     .returns(unit("m")?);
//! let f = quantity_input(sig, |args| Ok(args["d"].clone()))?;
//! let out = f.call(Arguments::new().arg(2.0 * unit("km")?))?;
//! assert_eq!(out, Value::from(2000.0 * unit("m")?));
//! ```

pub mod signature;
pub mod units;
pub mod validation;

pub use signature::{Annotation, Arguments, BoundArguments, Parameter, ParameterKind, Signature, Value};
pub use units::{registry, unit, Equivalencies, PhysicalType, Quantity, Unit, UnitRegistry, UnitsError};
pub use validation::{quantity_input, CallError, CallErrorKind, Constraint, DefinitionError, QuantityInput, ValidatedFn};
