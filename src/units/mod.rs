//! The unit algebra the validator checks against: dimensions, units,
//! quantities, physical types, equivalencies and the registry naming them.

pub use self::dimension::{BaseDimension, Dimension};
pub use self::equivalency::{dimensionless_angles, mass_energy, spectral, Equivalencies, Equivalency};
pub use self::error::UnitsError;
pub use self::expr::UnitExpr;
pub use self::physical_type::PhysicalType;
pub use self::quantity::Quantity;
pub use self::registry::{
    registry, unit, PhysicalTypeDefinition, RegistryConfig, UnitDefinition, UnitRegistry,
};
pub use self::unit::Unit;

// --- MODULE DECLARATIONS ---
mod dimension;
mod equivalency;
mod error;
mod expr;
mod physical_type;
mod quantity;
mod registry;
mod unit;
