//! Defines the `Quantity`, a number paired with a unit.

use crate::units::equivalency::Equivalencies;
use crate::units::error::UnitsError;
use crate::units::unit::Unit;
use std::fmt;
use std::ops::Mul;

/// A value with a unit, e.g. `1.0 * &arcsec`.
///
/// Equality is physical: `2 km == 2000 m`.
#[derive(Debug, Clone)]
pub struct Quantity {
    value: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Converts to `unit`; the dimensions must match.
    pub fn to(&self, unit: &Unit) -> Result<Quantity, UnitsError> {
        self.to_with(unit, &Equivalencies::none())
    }

    /// Converts to `unit`, allowing the given equivalencies.
    pub fn to_with(&self, unit: &Unit, equivalencies: &Equivalencies) -> Result<Quantity, UnitsError> {
        let value = self.unit.convert(self.value, unit, equivalencies)?;
        Ok(Quantity::new(value, unit.clone()))
    }

    /// Adds `other` after converting it to this quantity's unit. The result
    /// keeps this quantity's unit.
    pub fn checked_add(&self, other: &Quantity, equivalencies: &Equivalencies) -> Result<Quantity, UnitsError> {
        let rhs = other.to_with(&self.unit, equivalencies)?;
        Ok(Quantity::new(self.value + rhs.value, self.unit.clone()))
    }

    pub fn checked_sub(&self, other: &Quantity, equivalencies: &Equivalencies) -> Result<Quantity, UnitsError> {
        let rhs = other.to_with(&self.unit, equivalencies)?;
        Ok(Quantity::new(self.value - rhs.value, self.unit.clone()))
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.unit.dimension() == other.unit.dimension()
            && self.value * self.unit.scale() == other.value * other.unit.scale()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.expr().is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

impl Mul<f64> for Quantity {
    type Output = Quantity;

    fn mul(self, rhs: f64) -> Quantity {
        Quantity::new(self.value * rhs, self.unit)
    }
}

impl Mul<Quantity> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Quantity) -> Quantity {
        rhs * self
    }
}

impl Mul<&Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: &Unit) -> Quantity {
        Quantity::new(self, rhs.clone())
    }
}

impl Mul<Unit> for f64 {
    type Output = Quantity;

    fn mul(self, rhs: Unit) -> Quantity {
        Quantity::new(self, rhs)
    }
}
