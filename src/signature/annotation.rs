//! Defines the `Annotation`, the raw declared type of a parameter or return value.

use crate::units::Unit;
use std::fmt;

/// What a function declares for one of its parameters or its return value,
/// before the validator interprets it.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// A concrete unit, e.g. `arcsec`.
    Unit(Unit),
    /// A bare string. Must name a physical type, e.g. `"angle"`.
    Str(String),
    /// The generic `Quantity[target, "description"]` form.
    Quantity(Vec<Annotation>),
    Optional(Box<Annotation>),
    Union(Vec<Annotation>),
    /// The type of the absence marker.
    NoneType,
    /// Any type unrelated to units, e.g. `int` or an enum.
    Type(String),
}

impl Annotation {
    pub fn physical_type(name: &str) -> Self {
        Annotation::Str(name.to_string())
    }

    /// `Quantity[target]`.
    pub fn quantity(target: impl Into<Annotation>) -> Self {
        Annotation::Quantity(vec![target.into()])
    }

    /// `Quantity[target, "description"]`.
    pub fn quantity_with(target: impl Into<Annotation>, description: &str) -> Self {
        Annotation::Quantity(vec![target.into(), Annotation::Str(description.to_string())])
    }

    pub fn optional(inner: impl Into<Annotation>) -> Self {
        Annotation::Optional(Box::new(inner.into()))
    }

    pub fn union(members: impl IntoIterator<Item = Annotation>) -> Self {
        Annotation::Union(members.into_iter().collect())
    }

    pub fn ty(name: &str) -> Self {
        Annotation::Type(name.to_string())
    }

    /// The free-form description of a `Quantity[target, "description"]`
    /// annotation, looking through `Optional` and `Union`.
    pub fn description(&self) -> Option<&str> {
        match self {
            Annotation::Quantity(args) => match args.as_slice() {
                [_, Annotation::Str(text)] => Some(text.as_str()),
                _ => None,
            },
            Annotation::Optional(inner) => inner.description(),
            Annotation::Union(members) => members.iter().find_map(Annotation::description),
            _ => None,
        }
    }
}

impl From<Unit> for Annotation {
    fn from(unit: Unit) -> Self {
        Annotation::Unit(unit)
    }
}

impl From<&Unit> for Annotation {
    fn from(unit: &Unit) -> Self {
        Annotation::Unit(unit.clone())
    }
}

impl From<&str> for Annotation {
    fn from(s: &str) -> Self {
        Annotation::Str(s.to_string())
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: &[Annotation]| items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        match self {
            Annotation::Unit(u) => write!(f, "{}", u),
            Annotation::Str(s) => write!(f, "'{}'", s),
            Annotation::Quantity(args) => write!(f, "Quantity[{}]", join(args)),
            Annotation::Optional(inner) => write!(f, "Optional[{}]", inner),
            Annotation::Union(members) => write!(f, "Union[{}]", join(members)),
            Annotation::NoneType => write!(f, "None"),
            Annotation::Type(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::unit;

    #[test]
    fn test_display() {
        let km = unit("km").unwrap();
        let m = unit("m").unwrap();
        assert_eq!(Annotation::quantity_with(&km, "the distance").to_string(), "Quantity[km, 'the distance']");
        assert_eq!(
            Annotation::union([Annotation::quantity(&m), Annotation::NoneType]).to_string(),
            "Union[Quantity[m], None]"
        );
        assert_eq!(Annotation::optional("angle").to_string(), "Optional['angle']");
    }

    #[test]
    fn test_description_looks_through_wrappers() {
        let m = unit("m").unwrap();
        let a = Annotation::optional(Annotation::quantity_with(&m, "output"));
        assert_eq!(a.description(), Some("output"));
        assert_eq!(Annotation::quantity(&m).description(), None);
        assert_eq!(Annotation::ty("int").description(), None);
    }
}
