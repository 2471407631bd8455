//! Rule for checking, and converting, a function's return value.
use super::arguments::check_value;
use crate::signature::Value;
use crate::units::Equivalencies;
use crate::validation::constraint::{Constraint, Target};
use crate::validation::error::CallError;

/// Checks the value a function returned.
///
/// The absence marker always passes, so functions may return nothing on
/// purpose. A quantity accepted by a concrete unit is converted to that
/// unit; one accepted by a physical type is returned as is.
pub(crate) fn validate_return(
    function: &str,
    value: Value,
    constraint: &Constraint,
    equivalencies: &Equivalencies,
) -> Result<Value, CallError> {
    if constraint.is_none() || value.is_none() {
        return Ok(value);
    }

    let targets = constraint.targets();
    let accepted = check_value(function, "return", &value, &targets, equivalencies)?;
    match (accepted, value) {
        (Some(Target::Unit(unit)), Value::Quantity(q)) => Ok(Value::Quantity(q.to_with(unit, equivalencies)?)),
        (_, value) => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Annotation;
    use crate::units::{registry, unit};

    fn constraint(a: impl Into<Annotation>) -> Constraint {
        Constraint::resolve(&a.into(), registry()).unwrap()
    }

    #[test]
    fn test_converts_to_declared_unit() {
        let deg = unit("deg").unwrap();
        let out = validate_return("f", Value::from(3600.0 * unit("arcsec").unwrap()), &constraint(&deg), &Equivalencies::none())
            .unwrap();
        let q = out.as_quantity().unwrap();
        assert_eq!(q.unit().to_string(), "deg");
        assert!((q.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_physical_type_keeps_unit() {
        let out = validate_return("f", Value::from(2.0 * unit("km").unwrap()), &constraint("length"), &Equivalencies::none())
            .unwrap();
        assert_eq!(out.unit().unwrap().to_string(), "km");
    }

    #[test]
    fn test_one_of_converts_to_accepting_alternative() {
        let c = constraint(Annotation::union([
            Annotation::from(unit("m").unwrap()),
            Annotation::from(unit("s").unwrap()),
        ]));
        let out = validate_return("f", Value::from(2.0 * unit("min").unwrap()), &c, &Equivalencies::none()).unwrap();
        assert_eq!(out, Value::from(120.0 * unit("s").unwrap()));
        assert_eq!(out.unit().unwrap().to_string(), "s");
    }

    #[test]
    fn test_pass_through_cases() {
        let deg = constraint(unit("deg").unwrap());
        assert_eq!(validate_return("f", Value::None, &deg, &Equivalencies::none()), Ok(Value::None));
        assert_eq!(validate_return("f", Value::Int(0), &Constraint::None, &Equivalencies::none()), Ok(Value::Int(0)));
    }

    #[test]
    fn test_incompatible_return() {
        let err = validate_return("f", Value::from(1.0 * unit("km").unwrap()), &constraint(unit("deg").unwrap()), &Equivalencies::none())
            .unwrap_err();
        assert_eq!(err.to_string(), "Argument 'return' to function 'f' must be in units convertible to 'deg'.");

        let err = validate_return("f", Value::Int(0), &constraint(unit("deg").unwrap()), &Equivalencies::none()).unwrap_err();
        assert_eq!(err.kind(), crate::validation::CallErrorKind::Type);
    }
}
