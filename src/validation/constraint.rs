//! Normalizes annotations into `Constraint`s, once, when a validator is built.

use crate::signature::Annotation;
use crate::units::{Equivalencies, PhysicalType, Unit, UnitRegistry};
use crate::validation::error::DefinitionError;
use smallvec::SmallVec;
use std::fmt;

/// What a parameter or return value must be convertible to.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Passed through unchecked.
    None,
    Unit(Unit),
    PhysicalType(PhysicalType),
    /// The absence marker skips validation; anything else is checked.
    Optional(Box<Constraint>),
    /// At least one alternative must accept the value.
    OneOf(Vec<Constraint>),
}

/// A single acceptable target, flattened out of a `Constraint`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target<'a> {
    Unit(&'a Unit),
    PhysicalType(&'a PhysicalType),
}

impl Target<'_> {
    /// Whether a value in `unit` satisfies this target.
    pub fn accepts(&self, unit: &Unit, equivalencies: &Equivalencies) -> bool {
        match self {
            Target::Unit(target) => unit.is_equivalent(target, equivalencies),
            Target::PhysicalType(ptype) => {
                ptype.contains(unit) || equivalencies.links(unit.dimension(), ptype.dimension())
            }
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        match self {
            Target::Unit(u) => u.is_dimensionless(),
            Target::PhysicalType(p) => p.dimension().is_dimensionless(),
        }
    }
}

impl fmt::Display for Target<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Unit(u) => write!(f, "{}", u),
            Target::PhysicalType(p) => write!(f, "{}", p),
        }
    }
}

impl Constraint {
    /// Resolves an annotation against `registry`.
    ///
    /// Annotations unrelated to units resolve to `Constraint::None`;
    /// malformed unit annotations are an error.
    pub fn resolve(annotation: &Annotation, registry: &UnitRegistry) -> Result<Constraint, DefinitionError> {
        let invalid = || DefinitionError::InvalidTarget { target: annotation.to_string() };

        match annotation {
            Annotation::Unit(unit) => Ok(Constraint::Unit(unit.clone())),
            Annotation::Str(name) => registry
                .physical_type(name)
                .cloned()
                .map(Constraint::PhysicalType)
                .ok_or_else(invalid),
            Annotation::Quantity(args) => match args.as_slice() {
                [target] | [target, Annotation::Str(_)] => match target {
                    Annotation::Unit(_) | Annotation::Str(_) => Self::resolve(target, registry).map_err(|_| invalid()),
                    _ => Err(invalid()),
                },
                _ => Err(invalid()),
            },
            Annotation::Optional(inner) => Ok(match Self::resolve(inner, registry)? {
                Constraint::None => Constraint::None,
                c @ Constraint::Optional(_) => c,
                c => Constraint::Optional(Box::new(c)),
            }),
            Annotation::Union(members) => {
                let mut allows_none = false;
                let mut alternatives: Vec<Constraint> = Vec::new();
                for member in members {
                    if *member == Annotation::NoneType {
                        allows_none = true;
                        continue;
                    }
                    match Self::resolve(member, registry)? {
                        Constraint::None => {}
                        Constraint::Optional(inner) => {
                            allows_none = true;
                            alternatives.push(*inner);
                        }
                        Constraint::OneOf(nested) => alternatives.extend(nested),
                        c => alternatives.push(c),
                    }
                }

                let constraint = match alternatives.len() {
                    0 => return Ok(Constraint::None),
                    1 => alternatives.remove(0),
                    _ => Constraint::OneOf(alternatives),
                };
                Ok(if allows_none {
                    Constraint::Optional(Box::new(constraint))
                } else {
                    constraint
                })
            }
            Annotation::NoneType | Annotation::Type(_) => Ok(Constraint::None),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Constraint::None)
    }

    /// Whether the absence marker is accepted without validation.
    pub fn allows_absent(&self) -> bool {
        matches!(self, Constraint::Optional(_))
    }

    /// Every acceptable target in declaration order.
    pub fn targets(&self) -> SmallVec<[Target<'_>; 2]> {
        let mut out = SmallVec::new();
        self.collect_targets(&mut out);
        out
    }

    fn collect_targets<'a>(&'a self, out: &mut SmallVec<[Target<'a>; 2]>) {
        match self {
            Constraint::None => {}
            Constraint::Unit(u) => out.push(Target::Unit(u)),
            Constraint::PhysicalType(p) => out.push(Target::PhysicalType(p)),
            Constraint::Optional(inner) => inner.collect_targets(out),
            Constraint::OneOf(alternatives) => {
                for alt in alternatives {
                    alt.collect_targets(out);
                }
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::None => write!(f, "any"),
            Constraint::Unit(u) => write!(f, "{}", u),
            Constraint::PhysicalType(p) => write!(f, "{}", p),
            Constraint::Optional(inner) => write!(f, "{} or None", inner),
            Constraint::OneOf(alternatives) => {
                let items: Vec<String> = alternatives.iter().map(ToString::to_string).collect();
                write!(f, "one of ({})", items.join(", "))
            }
        }
    }
}
