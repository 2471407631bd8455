//! Defines the `Unit`, a named scale of measurement.

use crate::units::dimension::Dimension;
use crate::units::equivalency::Equivalencies;
use crate::units::error::UnitsError;
use crate::units::expr::UnitExpr;
use crate::units::registry;
use std::fmt;
use std::ops::{Div, Mul};

/// A unit of measurement: a symbolic expression, its size relative to the
/// coherent SI unit of the same dimension, and that dimension.
///
/// Two units are equal when they measure the same dimension at the same
/// scale, regardless of spelling (`km == 1000 m`).
#[derive(Debug, Clone)]
pub struct Unit {
    expr: UnitExpr,
    scale: f64,
    dimension: Dimension,
}

impl Unit {
    /// A named unit, e.g. `Unit::named("km", 1e3, length)`.
    pub fn named(symbol: &str, scale: f64, dimension: Dimension) -> Self {
        Self {
            expr: UnitExpr::symbol(symbol),
            scale,
            dimension,
        }
    }

    pub(crate) fn from_parts(expr: UnitExpr, scale: f64, dimension: Dimension) -> Self {
        Self { expr, scale, dimension }
    }

    /// The unscaled dimensionless unit. Its symbol is empty.
    pub fn dimensionless() -> Self {
        Self {
            expr: UnitExpr::default(),
            scale: 1.0,
            dimension: Dimension::DIMENSIONLESS,
        }
    }

    pub fn expr(&self) -> &UnitExpr {
        &self.expr
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension.is_dimensionless()
    }

    /// Name of this unit's physical type in the default registry, or its
    /// dimension in SI base units (`kg/s^2`) when none is registered there.
    ///
    /// Physical types added to a separate `UnitRegistry` are not consulted;
    /// their units are described by dimension.
    pub fn physical_type_name(&self) -> String {
        registry::registry()
            .physical_type_of(self)
            .map_or_else(|| self.dimension.to_string(), |p| p.name().to_string())
    }

    /// Whether a value in this unit can be expressed in `other`, either
    /// directly or through one of `equivalencies`.
    pub fn is_equivalent(&self, other: &Unit, equivalencies: &Equivalencies) -> bool {
        self.dimension == other.dimension || equivalencies.links(self.dimension, other.dimension)
    }

    /// Multiplicative factor taking values in `self` to values in `other`.
    pub fn conversion_factor(&self, other: &Unit) -> Result<f64, UnitsError> {
        if self.dimension != other.dimension {
            return Err(self.not_convertible(other));
        }
        Ok(self.scale / other.scale)
    }

    /// Converts `value` from this unit to `other`, falling back to
    /// `equivalencies` when the dimensions differ.
    pub fn convert(&self, value: f64, other: &Unit, equivalencies: &Equivalencies) -> Result<f64, UnitsError> {
        if self.dimension == other.dimension {
            return Ok(value * self.scale / other.scale);
        }
        equivalencies
            .convert(value, self, other)
            .ok_or_else(|| self.not_convertible(other))
    }

    /// # Panics
    /// If a dimension exponent leaves the `i8` range.
    pub fn powi(&self, power: i8) -> Unit {
        let dimension = self.dimension.powi(power);
        let mut expr = self.expr.clone();
        expr.powi(power as i32);
        Unit {
            expr,
            scale: self.scale.powi(power as i32),
            dimension,
        }
    }

    fn not_convertible(&self, other: &Unit) -> UnitsError {
        UnitsError::NotConvertible {
            from: self.to_string(),
            from_type: self.physical_type_name(),
            to: other.to_string(),
            to_type: other.physical_type_name(),
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.scale == other.scale
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl Mul<&Unit> for &Unit {
    type Output = Unit;

    fn mul(self, rhs: &Unit) -> Unit {
        let mut expr = self.expr.clone();
        expr.multiply(&rhs.expr);
        Unit {
            expr,
            scale: self.scale * rhs.scale,
            dimension: self.dimension * rhs.dimension,
        }
    }
}

impl Div<&Unit> for &Unit {
    type Output = Unit;

    fn div(self, rhs: &Unit) -> Unit {
        let mut expr = self.expr.clone();
        expr.divide(&rhs.expr);
        Unit {
            expr,
            scale: self.scale / rhs.scale,
            dimension: self.dimension / rhs.dimension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::dimension::BaseDimension;
    use crate::units::registry::unit;

    #[test]
    fn test_equality_ignores_spelling() {
        let m = Unit::named("m", 1.0, Dimension::base(BaseDimension::Length));
        let km = Unit::named("km", 1e3, Dimension::base(BaseDimension::Length));
        assert_ne!(m, km);
        assert_eq!(unit("km").unwrap(), km);
        assert_eq!(km.to_string(), "km");
    }

    #[test]
    fn test_composition() {
        let km = unit("km").unwrap();
        let s = unit("s").unwrap();
        let speed = &km / &s;
        assert_eq!(speed.to_string(), "km/s");
        assert_eq!(speed.physical_type_name(), "speed");
        assert_eq!((&speed * &s), km);
        assert_eq!(km.powi(2).to_string(), "km^2");
        assert_eq!(km.powi(2).scale(), 1e6);
    }

    #[test]
    fn test_conversion_factor() {
        let deg = unit("deg").unwrap();
        let arcsec = unit("arcsec").unwrap();
        let factor = deg.conversion_factor(&arcsec).unwrap();
        assert!((factor - 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_not_convertible_message() {
        let km = unit("km").unwrap();
        let deg = unit("deg").unwrap();
        let err = km.conversion_factor(&deg).unwrap_err();
        assert_eq!(err.to_string(), "'km' (length) and 'deg' (angle) are not convertible");
        assert!(!km.is_equivalent(&deg, &Equivalencies::none()));
    }
}
