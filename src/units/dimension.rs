//! Dimensional exponents of a unit.

use std::fmt;
use std::ops::{Div, Mul};

/// The base dimensions a unit can be built from, in exponent-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseDimension {
    Length,
    Mass,
    Time,
    Current,
    Temperature,
    Amount,
    LuminousIntensity,
    Angle,
    SolidAngle,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 9] = [
        BaseDimension::Length,
        BaseDimension::Mass,
        BaseDimension::Time,
        BaseDimension::Current,
        BaseDimension::Temperature,
        BaseDimension::Amount,
        BaseDimension::LuminousIntensity,
        BaseDimension::Angle,
        BaseDimension::SolidAngle,
    ];

    /// The SI symbol of the base unit measuring this dimension.
    pub fn si_symbol(self) -> &'static str {
        match self {
            BaseDimension::Length => "m",
            BaseDimension::Mass => "kg",
            BaseDimension::Time => "s",
            BaseDimension::Current => "A",
            BaseDimension::Temperature => "K",
            BaseDimension::Amount => "mol",
            BaseDimension::LuminousIntensity => "cd",
            BaseDimension::Angle => "rad",
            BaseDimension::SolidAngle => "sr",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// A dimension is the exponent of every base dimension, e.g. energy is
/// `kg^1 m^2 s^-2`.
///
/// It is `Copy + Ord + Hash` so it can key the equivalency graph directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dimension([i8; 9]);

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension([0; 9]);

    /// The dimension of a single base unit.
    pub fn base(base: BaseDimension) -> Self {
        let mut exps = [0; 9];
        exps[base.index()] = 1;
        Self(exps)
    }

    /// Builds a dimension from `(base, exponent)` pairs; repeated bases accumulate.
    ///
    /// # Panics
    /// If an accumulated exponent leaves the `i8` range.
    pub fn from_exponents(terms: &[(BaseDimension, i8)]) -> Self {
        terms
            .iter()
            .try_fold(Self::DIMENSIONLESS, |acc, &(base, exp)| {
                Self::base(base).checked_powi(exp).and_then(|d| acc.checked_mul(d))
            })
            .unwrap_or_else(|| panic!("dimension exponent overflow in {:?}", terms))
    }

    pub fn exponent(&self, base: BaseDimension) -> i8 {
        self.0[base.index()]
    }

    pub fn is_dimensionless(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Raises every exponent to `power`; `None` if one leaves the `i8` range.
    pub fn checked_powi(self, power: i8) -> Option<Self> {
        let mut exps = self.0;
        for e in exps.iter_mut() {
            *e = e.checked_mul(power)?;
        }
        Some(Self(exps))
    }

    /// The product dimension; `None` if an exponent leaves the `i8` range.
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        let mut exps = self.0;
        for (e, r) in exps.iter_mut().zip(rhs.0) {
            *e = e.checked_add(r)?;
        }
        Some(Self(exps))
    }

    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs.checked_powi(-1)?)
    }

    /// # Panics
    /// If an exponent leaves the `i8` range; see [`Dimension::checked_powi`].
    pub fn powi(self, power: i8) -> Self {
        match self.checked_powi(power) {
            Some(d) => d,
            None => panic!("dimension exponent overflow in ({})^{}", self, power),
        }
    }
}

/// Panics if an exponent leaves the `i8` range; see [`Dimension::checked_mul`].
impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match self.checked_mul(rhs) {
            Some(d) => d,
            None => panic!("dimension exponent overflow in ({})*({})", self, rhs),
        }
    }
}

/// Panics if an exponent leaves the `i8` range; see [`Dimension::checked_div`].
impl Div for Dimension {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Some(d) => d,
            None => panic!("dimension exponent overflow in ({})/({})", self, rhs),
        }
    }
}

/// Formats as SI base symbols, numerator then denominator, e.g. `kg*m^2/s^2`.
impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format_terms = |positive: bool| -> String {
            let mut terms: Vec<String> = BaseDimension::ALL
                .iter()
                .filter_map(|&b| {
                    let e = self.exponent(b);
                    if (positive && e > 0) || (!positive && e < 0) {
                        Some(if e.abs() == 1 {
                            b.si_symbol().to_string()
                        } else {
                            format!("{}^{}", b.si_symbol(), e.abs())
                        })
                    } else {
                        None
                    }
                })
                .collect();
            terms.sort();
            terms.join("*")
        };

        let num = format_terms(true);
        let den = format_terms(false);
        match (num.is_empty(), den.is_empty()) {
            (true, true) => write!(f, "1"),
            (false, true) => write!(f, "{}", num),
            (true, false) => write!(f, "1/{}", den),
            (false, false) => write!(f, "{}/{}", num, den),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn energy() -> Dimension {
        Dimension::from_exponents(&[
            (BaseDimension::Mass, 1),
            (BaseDimension::Length, 2),
            (BaseDimension::Time, -2),
        ])
    }

    #[test]
    fn test_multiply_and_divide_cancel() {
        let length = Dimension::base(BaseDimension::Length);
        let time = Dimension::base(BaseDimension::Time);
        let speed = length / time;
        assert_eq!(speed * time, length);
        assert!((length / length).is_dimensionless());
    }

    #[test]
    fn test_checked_arithmetic_stays_in_range() {
        let length = Dimension::base(BaseDimension::Length);
        let big = length.checked_powi(127).unwrap();
        assert_eq!(big.exponent(BaseDimension::Length), 127);
        assert_eq!(big.checked_mul(length), None);
        assert_eq!(length.checked_powi(-128).and_then(|d| d.checked_div(length)), None);
        assert_eq!(big.checked_div(length), length.checked_powi(126));
    }

    #[test]
    #[should_panic(expected = "dimension exponent overflow")]
    fn test_operator_overflow_panics() {
        let _ = Dimension::base(BaseDimension::Length).powi(127) * Dimension::base(BaseDimension::Length);
    }

    #[rstest]
    #[case(Dimension::base(BaseDimension::Length), "m")]
    #[case(energy(), "kg*m^2/s^2")]
    #[case(Dimension::base(BaseDimension::Time).powi(-1), "1/s")]
    #[case(Dimension::DIMENSIONLESS, "1")]
    fn test_display(#[case] dim: Dimension, #[case] expected: &str) {
        assert_eq!(dim.to_string(), expected);
    }
}
