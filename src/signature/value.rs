//! Defines the dynamic `Value` passed to and returned from validated functions.

use crate::units::{Quantity, Unit};
use std::fmt;

/// An argument or return value.
///
/// `None` is the absence marker. `Symbol` stands in for any opaque value
/// the validator never inspects, such as an enum member.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Quantity(Quantity),
    Symbol(String),
    Tuple(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(name.to_string())
    }

    pub fn tuple(values: impl IntoIterator<Item = Value>) -> Self {
        Value::Tuple(values.into_iter().collect())
    }

    /// The unit of a quantity-like value, if it has one.
    pub fn unit(&self) -> Option<&Unit> {
        self.as_quantity().map(Quantity::unit)
    }

    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Value::Quantity(q) => Some(q),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(values) => Some(values),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Plain (unit-less) numbers.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "'{}'", s),
            Value::Quantity(q) => write!(f, "{}", q),
            Value::Symbol(s) => write!(f, "{}", s),
            Value::Tuple(values) => {
                let items: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "({})", items.join(", "))
            }
            Value::Map(entries) => {
                let items: Vec<String> = entries.iter().map(|(k, v)| format!("'{}': {}", k, v)).collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        Value::Quantity(q)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::unit;

    #[test]
    fn test_only_quantities_expose_a_unit() {
        let m = unit("m").unwrap();
        assert_eq!(Value::from(2.0 * &m).unit(), Some(&m));
        assert_eq!(Value::from(100).unit(), None);
        assert_eq!(Value::from("cool string").unit(), None);
        assert_eq!(Value::None.unit(), None);
    }

    #[test]
    fn test_option_maps_to_absence_marker() {
        assert!(Value::from(None::<i64>).is_none());
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }

    #[test]
    fn test_display() {
        let arcsec = unit("arcsec").unwrap();
        let v = Value::tuple([Value::from(1.0 * &arcsec), Value::from(100), Value::None]);
        assert_eq!(v.to_string(), "(1 arcsec, 100, None)");
    }
}
