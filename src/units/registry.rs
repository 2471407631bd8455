//! The unit registry: named units, physical types and their configuration.

use crate::units::dimension::{BaseDimension, Dimension};
use crate::units::error::UnitsError;
use crate::units::expr::UnitExpr;
use crate::units::physical_type::PhysicalType;
use crate::units::unit::Unit;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

static DEFAULT_REGISTRY: Lazy<UnitRegistry> = Lazy::new(UnitRegistry::builtin);

/// The process-wide registry of built-in units and physical types.
pub fn registry() -> &'static UnitRegistry {
    &DEFAULT_REGISTRY
}

/// Resolves a unit expression against the default registry.
pub fn unit(expr: &str) -> Result<Unit, UnitsError> {
    registry().unit(expr)
}

/// A registry extension document.
///
/// ```json
/// {
///   "units": [{ "symbol": "furlong", "definition": "201.168 m", "aliases": ["fur"] }],
///   "physical_types": [{ "name": "spectral flux density", "unit": "W/m^2/Hz" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub units: Vec<UnitDefinition>,
    #[serde(default)]
    pub physical_types: Vec<PhysicalTypeDefinition>,
}

/// A unit defined as an optional numeric factor times a unit expression,
/// e.g. `"1000 m"` or `"kg*m/s^2"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDefinition {
    pub symbol: String,
    pub definition: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicalTypeDefinition {
    pub name: String,
    /// Any unit of the physical type; only its dimension is kept.
    pub unit: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Lookup tables for units (by symbol or alias) and physical types (by
/// name or alias).
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    // Canonical symbols in definition order, for reverse lookups.
    symbols: Vec<String>,
    physical_types: Vec<PhysicalType>,
    type_names: HashMap<String, usize>,
}

impl UnitRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the SI base and derived units plus the common
    /// astronomical ones.
    pub fn builtin() -> Self {
        use BaseDimension::*;

        let mut reg = Self::new();
        let d = Dimension::from_exponents;
        let pi = std::f64::consts::PI;

        // length
        reg.insert_unit("m", &["meter"], 1.0, d(&[(Length, 1)]));
        reg.insert_unit("km", &["kilometer"], 1e3, d(&[(Length, 1)]));
        reg.insert_unit("cm", &["centimeter"], 1e-2, d(&[(Length, 1)]));
        reg.insert_unit("mm", &["millimeter"], 1e-3, d(&[(Length, 1)]));
        reg.insert_unit("um", &["micron"], 1e-6, d(&[(Length, 1)]));
        reg.insert_unit("nm", &["nanometer"], 1e-9, d(&[(Length, 1)]));
        reg.insert_unit("Angstrom", &["AA"], 1e-10, d(&[(Length, 1)]));
        reg.insert_unit("AU", &["au"], 1.495_978_707e11, d(&[(Length, 1)]));
        reg.insert_unit("lyr", &["lightyear"], 9.460_730_472_580_8e15, d(&[(Length, 1)]));
        reg.insert_unit("pc", &["parsec"], 3.085_677_581_491_367_3e16, d(&[(Length, 1)]));
        reg.insert_unit("kpc", &["kiloparsec"], 3.085_677_581_491_367_3e19, d(&[(Length, 1)]));
        // mass
        reg.insert_unit("kg", &["kilogram"], 1.0, d(&[(Mass, 1)]));
        reg.insert_unit("g", &["gram"], 1e-3, d(&[(Mass, 1)]));
        reg.insert_unit("solMass", &["M_sun"], 1.988_409_870_698_051e30, d(&[(Mass, 1)]));
        // time
        reg.insert_unit("s", &["second"], 1.0, d(&[(Time, 1)]));
        reg.insert_unit("ms", &["millisecond"], 1e-3, d(&[(Time, 1)]));
        reg.insert_unit("min", &["minute"], 60.0, d(&[(Time, 1)]));
        reg.insert_unit("h", &["hour"], 3600.0, d(&[(Time, 1)]));
        reg.insert_unit("d", &["day"], 86400.0, d(&[(Time, 1)]));
        reg.insert_unit("yr", &["year"], 31_557_600.0, d(&[(Time, 1)]));
        // frequency
        reg.insert_unit("Hz", &["Hertz"], 1.0, d(&[(Time, -1)]));
        reg.insert_unit("kHz", &[], 1e3, d(&[(Time, -1)]));
        reg.insert_unit("MHz", &[], 1e6, d(&[(Time, -1)]));
        reg.insert_unit("GHz", &[], 1e9, d(&[(Time, -1)]));
        // angles
        reg.insert_unit("rad", &["radian"], 1.0, d(&[(Angle, 1)]));
        reg.insert_unit("deg", &["degree"], pi / 180.0, d(&[(Angle, 1)]));
        reg.insert_unit("arcmin", &["arcminute"], pi / 10_800.0, d(&[(Angle, 1)]));
        reg.insert_unit("arcsec", &["arcsecond"], pi / 648_000.0, d(&[(Angle, 1)]));
        reg.insert_unit("mas", &["milliarcsecond"], pi / 648_000_000.0, d(&[(Angle, 1)]));
        reg.insert_unit("sr", &["steradian"], 1.0, d(&[(SolidAngle, 1)]));
        // mechanics
        reg.insert_unit("N", &["Newton"], 1.0, d(&[(Mass, 1), (Length, 1), (Time, -2)]));
        reg.insert_unit("J", &["Joule"], 1.0, d(&[(Mass, 1), (Length, 2), (Time, -2)]));
        reg.insert_unit("erg", &[], 1e-7, d(&[(Mass, 1), (Length, 2), (Time, -2)]));
        reg.insert_unit("eV", &["electronvolt"], 1.602_176_634e-19, d(&[(Mass, 1), (Length, 2), (Time, -2)]));
        reg.insert_unit("keV", &[], 1.602_176_634e-16, d(&[(Mass, 1), (Length, 2), (Time, -2)]));
        reg.insert_unit("W", &["Watt"], 1.0, d(&[(Mass, 1), (Length, 2), (Time, -3)]));
        reg.insert_unit("Pa", &["Pascal"], 1.0, d(&[(Mass, 1), (Length, -1), (Time, -2)]));
        // remaining SI base units
        reg.insert_unit("A", &["Ampere"], 1.0, d(&[(Current, 1)]));
        reg.insert_unit("K", &["Kelvin"], 1.0, d(&[(Temperature, 1)]));
        reg.insert_unit("mol", &["mole"], 1.0, d(&[(Amount, 1)]));
        reg.insert_unit("cd", &["candela"], 1.0, d(&[(LuminousIntensity, 1)]));

        reg.insert_physical_type(PhysicalType::new("dimensionless", &[], Dimension::DIMENSIONLESS));
        reg.insert_physical_type(PhysicalType::new("length", &[], d(&[(Length, 1)])));
        reg.insert_physical_type(PhysicalType::new("mass", &[], d(&[(Mass, 1)])));
        reg.insert_physical_type(PhysicalType::new("time", &[], d(&[(Time, 1)])));
        reg.insert_physical_type(PhysicalType::new("electrical current", &["current"], d(&[(Current, 1)])));
        reg.insert_physical_type(PhysicalType::new("temperature", &[], d(&[(Temperature, 1)])));
        reg.insert_physical_type(PhysicalType::new("amount of substance", &["amount"], d(&[(Amount, 1)])));
        reg.insert_physical_type(PhysicalType::new("luminous intensity", &[], d(&[(LuminousIntensity, 1)])));
        reg.insert_physical_type(PhysicalType::new("angle", &[], d(&[(Angle, 1)])));
        reg.insert_physical_type(PhysicalType::new("solid angle", &[], d(&[(SolidAngle, 1)])));
        reg.insert_physical_type(PhysicalType::new("area", &[], d(&[(Length, 2)])));
        reg.insert_physical_type(PhysicalType::new("volume", &[], d(&[(Length, 3)])));
        reg.insert_physical_type(PhysicalType::new("speed", &["velocity"], d(&[(Length, 1), (Time, -1)])));
        reg.insert_physical_type(PhysicalType::new("acceleration", &[], d(&[(Length, 1), (Time, -2)])));
        reg.insert_physical_type(PhysicalType::new("frequency", &[], d(&[(Time, -1)])));
        reg.insert_physical_type(PhysicalType::new("angular speed", &["angular velocity", "angular frequency"], d(&[(Angle, 1), (Time, -1)])));
        reg.insert_physical_type(PhysicalType::new("force", &[], d(&[(Mass, 1), (Length, 1), (Time, -2)])));
        reg.insert_physical_type(PhysicalType::new("energy", &["work", "torque"], d(&[(Mass, 1), (Length, 2), (Time, -2)])));
        reg.insert_physical_type(PhysicalType::new("power", &["radiant flux"], d(&[(Mass, 1), (Length, 2), (Time, -3)])));
        reg.insert_physical_type(PhysicalType::new("pressure", &["stress", "energy density"], d(&[(Mass, 1), (Length, -1), (Time, -2)])));

        reg
    }

    /// The built-in registry extended with a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, UnitsError> {
        let mut reg = Self::builtin();
        reg.extend_from_json(json)?;
        Ok(reg)
    }

    /// Applies a JSON configuration document. Either every definition is
    /// applied or, on error, none is.
    pub fn extend_from_json(&mut self, json: &str) -> Result<(), UnitsError> {
        let config: RegistryConfig =
            serde_json::from_str(json).map_err(|e| UnitsError::Config(e.to_string()))?;
        self.apply(&config)
    }

    pub fn load_json_file(&mut self, path: impl AsRef<Path>) -> Result<(), UnitsError> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading unit registry configuration");
        let json = std::fs::read_to_string(path)
            .map_err(|e| UnitsError::Config(format!("{}: {}", path.display(), e)))?;
        self.extend_from_json(&json)
    }

    pub fn apply(&mut self, config: &RegistryConfig) -> Result<(), UnitsError> {
        let mut next = self.clone();
        for def in &config.units {
            let aliases: Vec<&str> = def.aliases.iter().map(String::as_str).collect();
            next.define(&def.symbol, &def.definition, &aliases)?;
        }
        for def in &config.physical_types {
            let aliases: Vec<&str> = def.aliases.iter().map(String::as_str).collect();
            next.define_physical_type(&def.name, &aliases, &def.unit)?;
        }
        debug!(
            units = config.units.len(),
            physical_types = config.physical_types.len(),
            "Applied unit registry configuration"
        );
        *self = next;
        Ok(())
    }

    /// Defines `symbol` as `definition`, an optional leading factor followed
    /// by a unit expression (`"1000 m"`, `"kg*m/s^2"`, `"1e-3"`).
    pub fn define(&mut self, symbol: &str, definition: &str, aliases: &[&str]) -> Result<Unit, UnitsError> {
        let definition = definition.trim();
        let (factor, expr) = match definition.split_once(char::is_whitespace) {
            Some((head, rest)) => match head.parse::<f64>() {
                Ok(factor) => (factor, rest.trim()),
                Err(_) => (1.0, definition),
            },
            None => match definition.parse::<f64>() {
                Ok(factor) => (factor, ""),
                Err(_) => (1.0, definition),
            },
        };
        let base = self.unit(expr)?;
        self.define_unit(symbol, aliases, factor * base.scale(), base.dimension())
    }

    /// Defines a named unit directly from its scale and dimension.
    pub fn define_unit(
        &mut self,
        symbol: &str,
        aliases: &[&str],
        scale: f64,
        dimension: Dimension,
    ) -> Result<Unit, UnitsError> {
        let symbol = symbol.trim();
        if UnitExpr::parse(symbol).map_or(true, |e| e != UnitExpr::symbol(symbol)) {
            return Err(UnitsError::Parse(symbol.to_string()));
        }
        for name in std::iter::once(&symbol).chain(aliases) {
            if self.units.contains_key(*name) {
                return Err(UnitsError::Duplicate(name.to_string()));
            }
        }
        Ok(self.insert_unit(symbol, aliases, scale, dimension))
    }

    /// Defines a physical type with the dimension of `unit_expr`.
    pub fn define_physical_type(
        &mut self,
        name: &str,
        aliases: &[&str],
        unit_expr: &str,
    ) -> Result<&PhysicalType, UnitsError> {
        let dimension = self.unit(unit_expr)?.dimension();
        for n in std::iter::once(&name).chain(aliases) {
            if self.type_names.contains_key(&Self::type_key(n)) {
                return Err(UnitsError::Duplicate(n.to_string()));
            }
        }
        let idx = self.insert_physical_type(PhysicalType::new(&Self::type_key(name), aliases, dimension));
        Ok(&self.physical_types[idx])
    }

    fn insert_unit(&mut self, symbol: &str, aliases: &[&str], scale: f64, dimension: Dimension) -> Unit {
        let unit = Unit::named(symbol, scale, dimension);
        self.units.insert(symbol.to_string(), unit.clone());
        for alias in aliases {
            self.units.insert(alias.to_string(), unit.clone());
        }
        self.symbols.push(symbol.to_string());
        unit
    }

    fn insert_physical_type(&mut self, ptype: PhysicalType) -> usize {
        let idx = self.physical_types.len();
        for name in ptype.names() {
            self.type_names.insert(Self::type_key(name), idx);
        }
        self.physical_types.push(ptype);
        idx
    }

    fn type_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Looks up a named unit by symbol or alias.
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.units.get(symbol)
    }

    /// Resolves a unit expression such as `"km/s"`. The empty string is the
    /// dimensionless unit.
    pub fn unit(&self, expr: &str) -> Result<Unit, UnitsError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Ok(Unit::dimensionless());
        }
        if let Some(unit) = self.units.get(expr) {
            return Ok(unit.clone());
        }

        let parsed = UnitExpr::parse(expr)?;
        let overflow = || UnitsError::ExponentOverflow(expr.to_string());
        let mut scale = 1.0;
        let mut dimension = Dimension::DIMENSIONLESS;
        for (symbol, exp) in parsed.terms() {
            let named = self
                .units
                .get(symbol)
                .ok_or_else(|| UnitsError::UnknownUnit(symbol.to_string()))?;
            let power = i8::try_from(exp).map_err(|_| overflow())?;
            let term = named.dimension().checked_powi(power).ok_or_else(overflow)?;
            dimension = dimension.checked_mul(term).ok_or_else(overflow)?;
            scale *= named.scale().powi(exp);
        }
        Ok(Unit::from_parts(parsed, scale, dimension))
    }

    /// Looks up a physical type by name or alias, case-insensitively.
    pub fn physical_type(&self, name: &str) -> Option<&PhysicalType> {
        self.type_names
            .get(&Self::type_key(name))
            .map(|&idx| &self.physical_types[idx])
    }

    /// The physical type `unit` belongs to, if any is registered.
    pub fn physical_type_of(&self, unit: &Unit) -> Option<&PhysicalType> {
        self.physical_types.iter().find(|p| p.contains(unit))
    }

    /// All named units of a physical type, in definition order.
    pub fn units_of(&self, ptype: &PhysicalType) -> Vec<&Unit> {
        self.symbols
            .iter()
            .filter_map(|s| self.units.get(s))
            .filter(|u| ptype.contains(u))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("m", "length")]
    #[case("arcsec", "angle")]
    #[case("km/s", "speed")]
    #[case("eV", "energy")]
    #[case("kg*m^2/s^2", "energy")]
    #[case("g/cm^3", "kg/m^3")]
    #[case("", "dimensionless")]
    #[case("m/km", "dimensionless")]
    fn test_physical_type_of(#[case] expr: &str, #[case] expected: &str) {
        let u = registry().unit(expr).unwrap();
        assert_eq!(u.physical_type_name(), expected);
    }

    #[rstest]
    #[case("m^256")]
    #[case("m^2*km^127")]
    #[case("s^-129")]
    #[case("1/rad^-128")]
    fn test_exponents_out_of_range(#[case] expr: &str) {
        assert_eq!(registry().unit(expr), Err(UnitsError::ExponentOverflow(expr.to_string())));
    }

    #[test]
    fn test_units_outside_default_registry_are_described_by_dimension() {
        let reg = UnitRegistry::from_json(r#"{ "units": [{ "symbol": "Jy", "definition": "1e-26 W*s/m^2" }] }"#).unwrap();
        let jy = reg.unit("Jy").unwrap();
        let err = jy.conversion_factor(&reg.unit("m").unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "'Jy' (kg/s^2) and 'm' (length) are not convertible");
    }

    #[test]
    fn test_exponent_limits() {
        let u = registry().unit("m^127/s^128").unwrap();
        assert_eq!(u.dimension().exponent(BaseDimension::Length), 127);
        assert_eq!(u.dimension().exponent(BaseDimension::Time), -128);
        assert!(!u.is_dimensionless());

        let err = UnitRegistry::from_json(r#"{ "units": [{ "symbol": "huge", "definition": "2 m^200" }] }"#).unwrap_err();
        assert_eq!(err, UnitsError::ExponentOverflow("m^200".into()));
    }

    #[rstest]
    #[case("furlong", UnitsError::UnknownUnit("furlong".into()))]
    #[case("km/parsnip", UnitsError::UnknownUnit("parsnip".into()))]
    #[case("m//s", UnitsError::Parse("m//s".into()))]
    fn test_unit_lookup_errors(#[case] expr: &str, #[case] expected: UnitsError) {
        assert_eq!(registry().unit(expr).unwrap_err(), expected);
    }

    #[test]
    fn test_aliases_resolve_to_canonical_symbol() {
        let u = registry().unit("arcsecond").unwrap();
        assert_eq!(u.to_string(), "arcsec");
    }

    #[test]
    fn test_physical_type_lookup_is_case_insensitive() {
        assert_eq!(registry().physical_type("Angle").unwrap().name(), "angle");
        assert_eq!(registry().physical_type("velocity").unwrap().name(), "speed");
        assert!(registry().physical_type("definitely not a unit").is_none());
    }

    #[test]
    fn test_units_of_angle() {
        let angle = registry().physical_type("angle").unwrap();
        let symbols: Vec<String> = registry().units_of(angle).iter().map(|u| u.to_string()).collect();
        assert_eq!(symbols, ["rad", "deg", "arcmin", "arcsec", "mas"]);
    }

    #[test]
    fn test_define_with_factor() {
        let mut reg = UnitRegistry::builtin();
        let furlong = reg.define("furlong", "201.168 m", &["fur"]).unwrap();
        assert_eq!(furlong.to_string(), "furlong");
        assert_eq!(reg.unit("fur").unwrap(), furlong);
        let per_fortnight = reg.define("fortnight", "14 d", &[]).unwrap();
        assert_eq!(per_fortnight.scale(), 14.0 * 86400.0);
        assert_eq!(reg.unit("furlong/fortnight").unwrap().dimension(), reg.unit("m/s").unwrap().dimension());
    }

    #[test]
    fn test_define_rejects_duplicates() {
        let mut reg = UnitRegistry::builtin();
        assert_eq!(
            reg.define("deg", "60 arcmin", &[]).unwrap_err(),
            UnitsError::Duplicate("deg".into())
        );
        assert_eq!(
            reg.define_physical_type("Length", &[], "m").unwrap_err(),
            UnitsError::Duplicate("Length".into())
        );
    }

    #[test]
    fn test_extend_from_json_is_all_or_nothing() {
        let mut reg = UnitRegistry::builtin();
        let json = r#"{
            "units": [
                { "symbol": "furlong", "definition": "201.168 m" },
                { "symbol": "deg", "definition": "1 rad" }
            ]
        }"#;
        assert_eq!(reg.extend_from_json(json).unwrap_err(), UnitsError::Duplicate("deg".into()));
        assert!(reg.get("furlong").is_none());
    }

    #[test]
    fn test_extend_from_json_physical_types() {
        let json = r#"{
            "physical_types": [
                { "name": "Spectral Flux Density", "unit": "W/m^2/Hz", "aliases": ["fnu"] }
            ]
        }"#;
        let err = UnitRegistry::from_json(json).unwrap_err();
        assert_eq!(err, UnitsError::Parse("W/m^2/Hz".into()));

        let json = r#"{
            "units": [{ "symbol": "Jy", "definition": "1e-26 W*s/m^2", "aliases": ["jansky"] }],
            "physical_types": [
                { "name": "Spectral Flux Density", "unit": "Jy", "aliases": ["fnu"] }
            ]
        }"#;
        let reg = UnitRegistry::from_json(json).unwrap();
        let fnu = reg.physical_type("fnu").unwrap();
        assert_eq!(fnu.name(), "spectral flux density");
        assert_eq!(reg.physical_type_of(&reg.unit("jansky").unwrap()), Some(fnu));
    }

    #[test]
    fn test_unknown_config_fields_are_rejected() {
        let err = UnitRegistry::from_json(r#"{ "unitz": [] }"#).unwrap_err();
        assert!(matches!(err, UnitsError::Config(_)));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "units": [{{ "symbol": "ly", "definition": "lyr" }}] }}"#).unwrap();

        let mut reg = UnitRegistry::builtin();
        reg.load_json_file(file.path()).unwrap();
        assert_eq!(reg.unit("ly").unwrap(), reg.unit("lyr").unwrap());

        let missing = reg.load_json_file(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(UnitsError::Config(_))));
    }
}
