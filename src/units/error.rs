//! Defines the error types for the units module.
use thiserror::Error;

/// Failures of the unit algebra itself: parsing, lookup and conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitsError {
    /// A unit expression could not be parsed (e.g. `"m//s"` or `"m^x"`).
    #[error("'{0}' is not a valid unit expression")]
    Parse(String),
    /// A symbol in a unit expression is not known to the registry.
    #[error("'{0}' did not parse as a unit")]
    UnknownUnit(String),
    /// A dimension exponent does not fit the supported range (-128 to 127).
    #[error("'{0}' has a dimension exponent out of range")]
    ExponentOverflow(String),
    /// The name does not refer to a known physical type.
    #[error("'{0}' is not a known physical type")]
    UnknownPhysicalType(String),
    /// The two units measure different things and no equivalency links them.
    #[error("'{from}' ({from_type}) and '{to}' ({to_type}) are not convertible")]
    NotConvertible {
        from: String,
        from_type: String,
        to: String,
        to_type: String,
    },
    /// A registry extension tried to redefine an existing symbol or name.
    #[error("'{0}' is already defined in the unit registry")]
    Duplicate(String),
    /// A registry configuration document could not be read or decoded.
    #[error("invalid unit registry configuration: {0}")]
    Config(String),
}
