//! Symbolic unit expressions such as `kg*m/s^2`.

use crate::units::error::UnitsError;
use std::collections::BTreeMap;
use std::fmt;

/// A parsed unit expression, mapping each unit symbol to its exponent.
/// Example: "kg*m/s^2" -> { "kg": 1, "m": 1, "s": -2 }
///
/// The expression is purely symbolic; the registry resolves each symbol to
/// a scale and dimension.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UnitExpr {
    terms: BTreeMap<String, i32>,
}

impl UnitExpr {
    /// An expression consisting of a single symbol.
    pub fn symbol(symbol: &str) -> Self {
        let mut terms = BTreeMap::new();
        terms.insert(symbol.to_string(), 1);
        Self { terms }
    }

    pub fn parse(s: &str) -> Result<Self, UnitsError> {
        let invalid = || UnitsError::Parse(s.to_string());
        if s.trim().is_empty() {
            return Err(invalid());
        }

        let mut terms = BTreeMap::new();
        let mut parts = s.split('/');

        if let Some(num) = parts.next() {
            Self::parse_product(num, 1, &mut terms).map_err(|_| invalid())?;
        }
        if let Some(den) = parts.next() {
            // "m/" has a denominator slot but nothing in it.
            if den.trim().is_empty() {
                return Err(invalid());
            }
            Self::parse_product(den, -1, &mut terms).map_err(|_| invalid())?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }

        terms.retain(|_, exp| *exp != 0);
        Ok(Self { terms })
    }

    fn parse_product(s: &str, sign: i32, terms: &mut BTreeMap<String, i32>) -> Result<(), ()> {
        let s = s.trim();
        if s.is_empty() || s == "1" {
            return Ok(());
        }
        for factor in s.split('*') {
            let mut parts = factor.split('^');
            let base = parts.next().ok_or(())?.trim();
            if base.is_empty() {
                return Err(());
            }
            let exp = parts.next().unwrap_or("1").trim().parse::<i32>().map_err(|_| ())?;
            if parts.next().is_some() {
                return Err(());
            }
            let total = terms.entry(base.to_string()).or_insert(0);
            *total = exp.checked_mul(sign).and_then(|e| total.checked_add(e)).ok_or(())?;
        }
        Ok(())
    }

    /// Iterates `(symbol, exponent)` pairs in symbol order.
    pub fn terms(&self) -> impl Iterator<Item = (&str, i32)> {
        self.terms.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn multiply(&mut self, other: &Self) {
        for (k, v) in &other.terms {
            let exp = self.terms.entry(k.clone()).or_insert(0);
            *exp = exp.saturating_add(*v);
        }
        self.terms.retain(|_, exp| *exp != 0);
    }

    pub fn divide(&mut self, other: &Self) {
        for (k, v) in &other.terms {
            let exp = self.terms.entry(k.clone()).or_insert(0);
            *exp = exp.saturating_sub(*v);
        }
        self.terms.retain(|_, exp| *exp != 0);
    }

    pub fn powi(&mut self, power: i32) {
        for exp in self.terms.values_mut() {
            *exp = exp.saturating_mul(power);
        }
        self.terms.retain(|_, exp| *exp != 0);
    }
}

/// Canonical form: symbols sorted, numerator then denominator. An empty
/// expression renders as the empty string (dimensionless).
impl fmt::Display for UnitExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (num, den): (Vec<_>, Vec<_>) = self.terms.iter().partition(|&(_, &v)| v > 0);

        let product = |terms: Vec<(&String, &i32)>| -> String {
            if terms.is_empty() {
                return "1".to_string();
            }
            terms
                .into_iter()
                .map(|(k, v)| if v.abs() == 1 { k.clone() } else { format!("{}^{}", k, v.abs()) })
                .collect::<Vec<_>>()
                .join("*")
        };

        if num.is_empty() && den.is_empty() {
            Ok(())
        } else if den.is_empty() {
            write!(f, "{}", product(num))
        } else {
            write!(f, "{}/{}", product(num), product(den))
        }
    }
}
