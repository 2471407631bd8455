//! Equivalencies: conversion rules between units of different dimensions.
//!
//! A rule links two units (e.g. `kg` and `J` for mass-energy) with a
//! forward and backward function. Rules are indexed by the dimension pair
//! they connect, so a lookup is a single edge query on the graph. Rules
//! apply one hop at a time; they do not chain.

use crate::units::dimension::{BaseDimension, Dimension};
use crate::units::unit::Unit;
use petgraph::graphmap::UnGraphMap;

const SPEED_OF_LIGHT: f64 = 299_792_458.0; // m / s
const PLANCK: f64 = 6.626_070_15e-34; // J s

/// A single conversion rule between `from` and `to`.
///
/// `forward` maps a value expressed in `from` to a value expressed in `to`;
/// `backward` is its inverse.
#[derive(Debug, Clone)]
pub struct Equivalency {
    name: &'static str,
    from: Unit,
    to: Unit,
    forward: fn(f64) -> f64,
    backward: fn(f64) -> f64,
}

impl Equivalency {
    pub fn new(
        name: &'static str,
        from: Unit,
        to: Unit,
        forward: fn(f64) -> f64,
        backward: fn(f64) -> f64,
    ) -> Self {
        Self { name, from, to, forward, backward }
    }
}

/// A set of equivalencies enabled for a validation or conversion.
#[derive(Debug, Clone, Default)]
pub struct Equivalencies {
    rules: Vec<Equivalency>,
    // Edge weight is the index of the rule in `rules`.
    links: UnGraphMap<Dimension, usize>,
}

impl Equivalencies {
    /// No equivalencies: only identical dimensions convert.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_rules(rules: impl IntoIterator<Item = Equivalency>) -> Self {
        let mut set = Self::default();
        for rule in rules {
            set.push(rule);
        }
        set
    }

    /// Adds a rule. When two rules connect the same dimensions, the first wins.
    pub fn push(&mut self, rule: Equivalency) {
        let (a, b) = (rule.from.dimension(), rule.to.dimension());
        if a == b || self.links.contains_edge(a, b) {
            return;
        }
        self.links.add_edge(a, b, self.rules.len());
        self.rules.push(rule);
    }

    /// Combines two sets; rules of `self` take precedence.
    pub fn merged(mut self, other: &Equivalencies) -> Self {
        for rule in &other.rules {
            self.push(rule.clone());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    /// Whether some rule connects the two dimensions.
    pub fn links(&self, a: Dimension, b: Dimension) -> bool {
        self.links.contains_edge(a, b)
    }

    /// Converts `value` in unit `from` to unit `to` through a single rule.
    /// Returns `None` when no rule connects the two dimensions.
    pub fn convert(&self, value: f64, from: &Unit, to: &Unit) -> Option<f64> {
        let &idx = self.links.edge_weight(from.dimension(), to.dimension())?;
        let rule = &self.rules[idx];
        if from.dimension() == rule.from.dimension() {
            let v = value * from.scale() / rule.from.scale();
            Some((rule.forward)(v) * rule.to.scale() / to.scale())
        } else {
            let v = value * from.scale() / rule.to.scale();
            Some((rule.backward)(v) * rule.from.scale() / to.scale())
        }
    }
}

fn si(symbol: &str, terms: &[(BaseDimension, i8)]) -> Unit {
    Unit::named(symbol, 1.0, Dimension::from_exponents(terms))
}

fn kg() -> Unit {
    si("kg", &[(BaseDimension::Mass, 1)])
}

fn joule() -> Unit {
    si("J", &[(BaseDimension::Mass, 1), (BaseDimension::Length, 2), (BaseDimension::Time, -2)])
}

/// Mass and energy via `E = mc^2`, also for mass per area, per volume and
/// per time (power).
pub fn mass_energy() -> Equivalencies {
    let c2 = |x: f64| x * SPEED_OF_LIGHT * SPEED_OF_LIGHT;
    let inv_c2 = |x: f64| x / (SPEED_OF_LIGHT * SPEED_OF_LIGHT);
    let m = si("m", &[(BaseDimension::Length, 1)]);
    let (m2, m3) = (m.powi(2), m.powi(3));
    let s = si("s", &[(BaseDimension::Time, 1)]);

    Equivalencies::from_rules([
        Equivalency::new("mass_energy", kg(), joule(), c2, inv_c2),
        Equivalency::new("mass_energy", &kg() / &m2, &joule() / &m2, c2, inv_c2),
        Equivalency::new("mass_energy", &kg() / &m3, &joule() / &m3, c2, inv_c2),
        Equivalency::new("mass_energy", &kg() / &s, &joule() / &s, c2, inv_c2),
    ])
}

/// Wavelength, frequency and photon energy of electromagnetic radiation.
pub fn spectral() -> Equivalencies {
    let m = si("m", &[(BaseDimension::Length, 1)]);
    let hz = si("Hz", &[(BaseDimension::Time, -1)]);

    Equivalencies::from_rules([
        Equivalency::new("spectral", m.clone(), hz.clone(), |x| SPEED_OF_LIGHT / x, |x| SPEED_OF_LIGHT / x),
        Equivalency::new("spectral", m, joule(), |x| PLANCK * SPEED_OF_LIGHT / x, |x| PLANCK * SPEED_OF_LIGHT / x),
        Equivalency::new("spectral", hz, joule(), |x| x * PLANCK, |x| x / PLANCK),
    ])
}

/// Angles treated as dimensionless numbers (radians).
pub fn dimensionless_angles() -> Equivalencies {
    let rad = si("rad", &[(BaseDimension::Angle, 1)]);
    Equivalencies::from_rules([Equivalency::new("dimensionless_angles", rad, Unit::dimensionless(), |x| x, |x| x)])
}
