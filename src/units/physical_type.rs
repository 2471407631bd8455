//! Physical types: named categories of mutually convertible units.

use crate::units::dimension::Dimension;
use crate::units::unit::Unit;
use std::fmt;

/// A category such as "length" or "energy", identified by its dimension.
///
/// A physical type may carry aliases ("work" and "torque" share the
/// dimension of "energy"); it always displays as its canonical name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalType {
    name: String,
    aliases: Vec<String>,
    dimension: Dimension,
}

impl PhysicalType {
    pub fn new(name: &str, aliases: &[&str], dimension: Dimension) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            dimension,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Canonical name followed by aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn contains(&self, unit: &Unit) -> bool {
        unit.dimension() == self.dimension
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::registry::{registry, unit};

    #[test]
    fn test_membership_is_by_dimension() {
        let energy = registry().physical_type("energy").unwrap();
        assert_eq!(energy.dimension().to_string(), "kg*m^2/s^2");
        assert!(energy.contains(&unit("kg*m^2/s^2").unwrap()));
        assert!(energy.contains(&unit("eV").unwrap()));
        assert!(!energy.contains(&unit("g").unwrap()));
    }

    #[test]
    fn test_aliases_display_as_canonical_name() {
        let work = registry().physical_type("work").unwrap();
        assert_eq!(work.to_string(), "energy");
        assert!(work.names().any(|n| n == "torque"));
    }
}
