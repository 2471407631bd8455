//! Rule for checking a single bound argument against its constraint.
use crate::signature::Value;
use crate::units::Equivalencies;
use crate::validation::constraint::{Constraint, Target};
use crate::validation::error::CallError;

/// Checks one argument.
///
/// The value is never converted: a compatible quantity keeps its own unit.
/// `default_is_none` lets an explicitly passed absence marker through when
/// the parameter's own default is the absence marker.
pub(crate) fn validate_argument(
    function: &str,
    name: &str,
    value: &Value,
    constraint: &Constraint,
    default_is_none: bool,
    equivalencies: &Equivalencies,
) -> Result<(), CallError> {
    if constraint.is_none() {
        return Ok(());
    }
    if value.is_none() && (constraint.allows_absent() || default_is_none) {
        return Ok(());
    }
    check_value(function, name, value, &constraint.targets(), equivalencies).map(|_| ())
}

/// The unit check shared by arguments and return values. On success,
/// returns the first target accepting the value, if the value has a unit.
pub(crate) fn check_value<'t>(
    function: &str,
    name: &str,
    value: &Value,
    targets: &[Target<'t>],
    equivalencies: &Equivalencies,
) -> Result<Option<Target<'t>>, CallError> {
    let Some(unit) = value.unit() else {
        // Plain numbers are dimensionless quantities.
        if value.is_number() && targets.iter().any(Target::is_dimensionless) {
            return Ok(None);
        }
        return Err(CallError::NotAQuantity {
            argument: name.to_string(),
            function: function.to_string(),
        });
    };

    match targets.iter().find(|t| t.accepts(unit, equivalencies)) {
        Some(&target) => Ok(Some(target)),
        None => Err(CallError::IncompatibleUnits {
            argument: name.to_string(),
            function: function.to_string(),
            target: targets.first().map(ToString::to_string).unwrap_or_default(),
        }),
    }
}
