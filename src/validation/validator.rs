//! The validator builder and the validated function it produces.
use super::constraint::Constraint;
use super::error::{CallError, DefinitionError};
use super::rules::{arguments, returns};
use crate::signature::{Annotation, Arguments, BoundArguments, Signature, Value};
use crate::units::{registry, Equivalencies, UnitRegistry};
use std::fmt;
use std::sync::Arc;

/// Configures unit validation for a function and wraps it.
///
/// Constraints come from the signature's annotations. Overrides set with
/// [`QuantityInput::param`] and [`QuantityInput::returns`] replace the
/// annotation of the same name.
///
/// ```ignore
/// let f = QuantityInput::new()
///     .param("solarx", unit("arcsec")?)
///     .param("solary", "angle")
///     .wrap(signature, |args| Ok(args["solarx"].clone()))?;
/// ```
#[derive(Debug, Clone)]
pub struct QuantityInput<'r> {
    registry: &'r UnitRegistry,
    overrides: Vec<(String, Annotation)>,
    return_override: Option<Annotation>,
    equivalencies: Equivalencies,
}

impl Default for QuantityInput<'static> {
    fn default() -> Self {
        Self::with_registry(registry())
    }
}

impl QuantityInput<'static> {
    /// A validator resolving names against the process-wide registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'r> QuantityInput<'r> {
    pub fn with_registry(registry: &'r UnitRegistry) -> Self {
        Self {
            registry,
            overrides: Vec::new(),
            return_override: None,
            equivalencies: Equivalencies::none(),
        }
    }

    /// Constrains parameter `name`, taking precedence over its annotation.
    pub fn param(mut self, name: &str, annotation: impl Into<Annotation>) -> Self {
        let annotation = annotation.into();
        match self.overrides.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = annotation,
            None => self.overrides.push((name.to_string(), annotation)),
        }
        self
    }

    /// Constrains the return value, taking precedence over the signature's
    /// return annotation.
    pub fn returns(mut self, annotation: impl Into<Annotation>) -> Self {
        self.return_override = Some(annotation.into());
        self
    }

    /// Enables equivalencies for every check. Repeated calls accumulate.
    pub fn equivalencies(mut self, equivalencies: Equivalencies) -> Self {
        self.equivalencies = self.equivalencies.merged(&equivalencies);
        self
    }

    /// Resolves every constraint and wraps `body`.
    ///
    /// # Errors
    /// A malformed signature, a malformed `Quantity[...]` annotation or a
    /// string naming no physical type.
    pub fn wrap<F>(self, signature: Signature, body: F) -> Result<ValidatedFn<F>, DefinitionError>
    where
        F: Fn(&BoundArguments) -> Result<Value, CallError>,
    {
        signature.check()?;
        let function = signature.name();

        for (name, _) in &self.overrides {
            if signature.parameter(name).is_none() {
                tracing::warn!(function, parameter = %name, "ignoring constraint for unknown parameter");
            }
        }

        let mut parameters = Vec::with_capacity(signature.parameters().len());
        for p in signature.parameters() {
            let annotation = self.override_for(p.name()).or(p.annotation());
            let variadic = p.kind().is_variadic();
            let constraint = match annotation {
                Some(a) if !variadic => Constraint::resolve(a, self.registry)?,
                _ => Constraint::None,
            };
            tracing::trace!(function, parameter = p.name(), %constraint, "resolved constraint");

            parameters.push(ResolvedParameter {
                name: p.name().to_string(),
                constraint,
                description: annotation.and_then(Annotation::description).map(str::to_string),
                default_is_none: p.default_value().is_some_and(Value::is_none),
                variadic,
            });
        }

        let return_constraint = match self.return_override.as_ref().or(signature.return_annotation()) {
            Some(a) => Constraint::resolve(a, self.registry)?,
            None => Constraint::None,
        };

        tracing::debug!(
            function,
            constrained = parameters.iter().filter(|p| !p.constraint.is_none()).count(),
            returns = %return_constraint,
            equivalencies = self.equivalencies.len(),
            "built quantity validator"
        );

        Ok(ValidatedFn {
            signature,
            parameters,
            return_constraint,
            equivalencies: Arc::new(self.equivalencies),
            body,
        })
    }

    fn override_for(&self, name: &str) -> Option<&Annotation> {
        self.overrides.iter().find(|(n, _)| n == name).map(|(_, a)| a)
    }
}

/// Wraps `body` using only the signature's annotations and the
/// process-wide registry.
pub fn quantity_input<F>(signature: Signature, body: F) -> Result<ValidatedFn<F>, DefinitionError>
where
    F: Fn(&BoundArguments) -> Result<Value, CallError>,
{
    QuantityInput::new().wrap(signature, body)
}

#[derive(Debug, Clone)]
struct ResolvedParameter {
    name: String,
    constraint: Constraint,
    description: Option<String>,
    default_is_none: bool,
    variadic: bool,
}

/// A function whose arguments and return value are checked against their
/// unit constraints on every call.
pub struct ValidatedFn<F> {
    signature: Signature,
    parameters: Vec<ResolvedParameter>,
    return_constraint: Constraint,
    equivalencies: Arc<Equivalencies>,
    body: F,
}

impl<F> ValidatedFn<F>
where
    F: Fn(&BoundArguments) -> Result<Value, CallError>,
{
    /// Binds `args`, checks every constrained argument, runs the function
    /// and checks its result.
    ///
    /// The function does not run unless every argument passes. Arguments
    /// are handed over unconverted; a returned quantity is converted when
    /// the return constraint names a concrete unit.
    pub fn call(&self, args: Arguments) -> Result<Value, CallError> {
        let function = self.signature.name();
        let bound = self
            .signature
            .bind(args)
            .inspect_err(|e| tracing::debug!(function, error = %e, "binding failed"))?
            .with_equivalencies(Arc::clone(&self.equivalencies));

        for (param, (_, value)) in self.parameters.iter().zip(bound.iter()) {
            if param.variadic {
                continue;
            }
            arguments::validate_argument(
                function,
                &param.name,
                value,
                &param.constraint,
                param.default_is_none,
                &self.equivalencies,
            )
            .inspect_err(|e| tracing::debug!(function, argument = %param.name, error = %e, "argument rejected"))?;
        }

        let result = (self.body)(&bound)?;
        returns::validate_return(function, result, &self.return_constraint, &self.equivalencies)
            .inspect_err(|e| tracing::debug!(function, error = %e, "return value rejected"))
    }
}

impl<F> ValidatedFn<F> {
    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The resolved constraint of parameter `name`.
    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.parameter(name).map(|p| &p.constraint)
    }

    pub fn return_constraint(&self) -> &Constraint {
        &self.return_constraint
    }

    /// The free-form text of a `Quantity[unit, "text"]` annotation.
    pub fn description(&self, name: &str) -> Option<&str> {
        self.parameter(name).and_then(|p| p.description.as_deref())
    }

    pub fn equivalencies(&self) -> &Equivalencies {
        &self.equivalencies
    }

    fn parameter(&self, name: &str) -> Option<&ResolvedParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl<F> fmt::Debug for ValidatedFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedFn")
            .field("name", &self.signature.name())
            .field("parameters", &self.parameters)
            .field("return_constraint", &self.return_constraint)
            .finish_non_exhaustive()
    }
}
