//! Defines `Parameter` and `Signature`, the declared calling convention of a
//! function.

use crate::signature::annotation::Annotation;
use crate::signature::error::SignatureError;
use crate::signature::value::Value;
use std::collections::HashSet;

/// How an argument may be supplied for a parameter.
///
/// Variants are declared in the order they must appear in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterKind {
    PositionalOnly,
    PositionalOrKeyword,
    /// `*args`: collects surplus positional arguments into a tuple.
    VarPositional,
    KeywordOnly,
    /// `**kwargs`: collects surplus keyword arguments into a map.
    VarKeyword,
}

impl ParameterKind {
    pub fn is_variadic(self) -> bool {
        matches!(self, ParameterKind::VarPositional | ParameterKind::VarKeyword)
    }

    pub fn accepts_positional(self) -> bool {
        matches!(self, ParameterKind::PositionalOnly | ParameterKind::PositionalOrKeyword)
    }

    pub fn accepts_keyword(self) -> bool {
        matches!(self, ParameterKind::PositionalOrKeyword | ParameterKind::KeywordOnly)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    kind: ParameterKind,
    annotation: Option<Annotation>,
    default: Option<Value>,
}

impl Parameter {
    /// A positional-or-keyword parameter.
    pub fn new(name: &str) -> Self {
        Self::with_kind(name, ParameterKind::PositionalOrKeyword)
    }

    pub fn positional_only(name: &str) -> Self {
        Self::with_kind(name, ParameterKind::PositionalOnly)
    }

    pub fn keyword_only(name: &str) -> Self {
        Self::with_kind(name, ParameterKind::KeywordOnly)
    }

    pub fn var_positional(name: &str) -> Self {
        Self::with_kind(name, ParameterKind::VarPositional)
    }

    pub fn var_keyword(name: &str) -> Self {
        Self::with_kind(name, ParameterKind::VarKeyword)
    }

    fn with_kind(name: &str, kind: ParameterKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            annotation: None,
            default: None,
        }
    }

    pub fn annotated(mut self, annotation: impl Into<Annotation>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A function's name, ordered parameters and return annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    name: String,
    parameters: Vec<Parameter>,
    return_annotation: Option<Annotation>,
}

impl Signature {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parameters: Vec::new(),
            return_annotation: None,
        }
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, annotation: impl Into<Annotation>) -> Self {
        self.return_annotation = Some(annotation.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn return_annotation(&self) -> Option<&Annotation> {
        self.return_annotation.as_ref()
    }

    /// Checks the structural rules a callable's signature obeys: unique
    /// names, kinds in declaration order, at most one of each variadic, no
    /// required positional parameter after a defaulted one.
    pub fn check(&self) -> Result<(), SignatureError> {
        let mut seen = HashSet::new();
        let mut last_kind = ParameterKind::PositionalOnly;
        let mut saw_default = false;

        for p in &self.parameters {
            let err_fields = || (self.name.clone(), p.name.clone());

            if !seen.insert(p.name.as_str()) {
                let (function, name) = err_fields();
                return Err(SignatureError::DuplicateParameter { function, name });
            }
            if p.kind < last_kind || (p.kind == last_kind && p.kind.is_variadic()) {
                let (function, name) = err_fields();
                return Err(SignatureError::OutOfOrder { function, name });
            }
            if p.kind.is_variadic() && p.default.is_some() {
                let (function, name) = err_fields();
                return Err(SignatureError::VariadicDefault { function, name });
            }
            if p.kind.accepts_positional() {
                if p.default.is_some() {
                    saw_default = true;
                } else if saw_default {
                    let (function, name) = err_fields();
                    return Err(SignatureError::NonDefaultAfterDefault { function, name });
                }
            }
            last_kind = p.kind;
        }
        Ok(())
    }
}
