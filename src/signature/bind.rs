//! Binds call-site arguments to a signature's parameters.

use crate::signature::error::BindError;
use crate::signature::parameter::{ParameterKind, Signature};
use crate::signature::value::Value;
use crate::units::{Equivalencies, Quantity};
use once_cell::sync::Lazy;
use std::ops::Index;
use std::sync::Arc;

static NO_EQUIVALENCIES: Lazy<Equivalencies> = Lazy::new(Equivalencies::none);

/// The positional and keyword arguments of one call, in call-site order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    pub fn kwarg(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.keywords.push((name.to_string(), value.into()));
        self
    }
}

/// Every parameter of a signature paired with its value for one call, in
/// parameter order, after defaults have been applied.
///
/// `*args` are bound as a `Value::Tuple` and `**kwargs` as a `Value::Map`.
#[derive(Debug, Clone)]
pub struct BoundArguments {
    values: Vec<(String, Value)>,
    equivalencies: Option<Arc<Equivalencies>>,
}

impl BoundArguments {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn quantity(&self, name: &str) -> Option<&Quantity> {
        self.get(name).and_then(Value::as_quantity)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The equivalencies enabled for this call; unit arithmetic in the
    /// function body should use them.
    pub fn equivalencies(&self) -> &Equivalencies {
        self.equivalencies.as_deref().unwrap_or(&*NO_EQUIVALENCIES)
    }

    pub(crate) fn with_equivalencies(mut self, equivalencies: Arc<Equivalencies>) -> Self {
        self.equivalencies = Some(equivalencies);
        self
    }
}

/// Panics if `name` is not a parameter of the bound signature.
impl Index<&str> for BoundArguments {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        match self.get(name) {
            Some(v) => v,
            None => panic!("no parameter named '{}'", name),
        }
    }
}

impl Signature {
    /// Binds `args` to the parameters, filling omitted ones from their
    /// defaults.
    pub fn bind(&self, args: Arguments) -> Result<BoundArguments, BindError> {
        let params = self.parameters();
        let mut slots: Vec<Option<Value>> = vec![None; params.len()];
        let mut extra_positional = Vec::new();
        let mut extra_keywords: Vec<(String, Value)> = Vec::new();
        let has_var_positional = params.iter().any(|p| p.kind() == ParameterKind::VarPositional);
        let has_var_keyword = params.iter().any(|p| p.kind() == ParameterKind::VarKeyword);

        // 1. Positional arguments fill positional slots in order.
        let positional_slots: Vec<usize> = params
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind().accepts_positional())
            .map(|(i, _)| i)
            .collect();
        let given = args.positional.len();
        for (n, value) in args.positional.into_iter().enumerate() {
            match positional_slots.get(n) {
                Some(&i) => slots[i] = Some(value),
                None if has_var_positional => extra_positional.push(value),
                None => {
                    return Err(BindError::TooManyPositional {
                        function: self.name().to_string(),
                        expected: positional_slots.len(),
                        given,
                    })
                }
            }
        }

        // 2. Keyword arguments go to the named slot, or to **kwargs.
        for (name, value) in args.keywords {
            let multiple = || BindError::MultipleValues {
                function: self.name().to_string(),
                name: name.clone(),
            };
            let slot = params
                .iter()
                .position(|p| p.name() == name && p.kind().accepts_keyword());
            match slot {
                Some(i) if slots[i].is_some() => return Err(multiple()),
                Some(i) => slots[i] = Some(value),
                None if has_var_keyword => {
                    if extra_keywords.iter().any(|(n, _)| *n == name) {
                        return Err(multiple());
                    }
                    extra_keywords.push((name, value));
                }
                None => {
                    return Err(BindError::UnexpectedKeyword {
                        function: self.name().to_string(),
                        name,
                    })
                }
            }
        }

        // 3. Defaults, variadics and missing arguments.
        let mut values = Vec::with_capacity(params.len());
        for (p, slot) in params.iter().zip(slots) {
            let value = match (p.kind(), slot) {
                (ParameterKind::VarPositional, _) => Value::Tuple(std::mem::take(&mut extra_positional)),
                (ParameterKind::VarKeyword, _) => Value::Map(std::mem::take(&mut extra_keywords)),
                (_, Some(v)) => v,
                (_, None) => match p.default_value() {
                    Some(d) => d.clone(),
                    None => {
                        return Err(BindError::Missing {
                            function: self.name().to_string(),
                            name: p.name().to_string(),
                        })
                    }
                },
            };
            values.push((p.name().to_string(), value));
        }

        Ok(BoundArguments { values, equivalencies: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::parameter::Parameter;

    fn sig() -> Signature {
        Signature::new("myfunc_args")
            .param(Parameter::new("solarx"))
            .param(Parameter::new("solary"))
            .param(Parameter::new("myk").default(1000))
    }

    #[test]
    fn test_positional_keyword_and_default() {
        let bound = sig().bind(Arguments::new().arg(1).kwarg("solary", 2)).unwrap();
        let values: Vec<_> = bound.iter().map(|(n, v)| (n.to_string(), v.clone())).collect();
        assert_eq!(
            values,
            vec![
                ("solarx".to_string(), Value::Int(1)),
                ("solary".to_string(), Value::Int(2)),
                ("myk".to_string(), Value::Int(1000)),
            ]
        );
        assert!(bound.equivalencies().is_empty());
    }

    #[test]
    fn test_binding_errors() {
        let too_many = sig().bind(Arguments::new().arg(1).arg(2).arg(3).arg(4)).unwrap_err();
        assert_eq!(too_many.to_string(), "myfunc_args() takes 3 positional arguments but 4 were given");

        let unexpected = sig().bind(Arguments::new().arg(1).arg(2).kwarg("nope", 3)).unwrap_err();
        assert_eq!(unexpected.to_string(), "myfunc_args() got an unexpected keyword argument 'nope'");

        let twice = sig().bind(Arguments::new().arg(1).arg(2).kwarg("solarx", 3)).unwrap_err();
        assert_eq!(twice.to_string(), "myfunc_args() got multiple values for argument 'solarx'");

        let missing = sig().bind(Arguments::new().arg(1)).unwrap_err();
        assert_eq!(missing.to_string(), "myfunc_args() missing required argument: 'solary'");
    }

    #[test]
    fn test_variadics_collect_surplus() {
        let sig = Signature::new("f")
            .param(Parameter::positional_only("a"))
            .param(Parameter::var_positional("args"))
            .param(Parameter::keyword_only("k").default(false))
            .param(Parameter::var_keyword("kwargs"));
        let bound = sig
            .bind(Arguments::new().arg(1).arg(2).arg(3).kwarg("z", "zed").kwarg("k", true))
            .unwrap();

        assert_eq!(bound["a"], Value::Int(1));
        assert_eq!(bound["args"], Value::tuple([Value::Int(2), Value::Int(3)]));
        assert_eq!(bound["k"], Value::Bool(true));
        assert_eq!(bound["kwargs"], Value::Map(vec![("z".to_string(), Value::from("zed"))]));
    }

    #[test]
    fn test_positional_only_cannot_be_passed_by_keyword() {
        let sig = Signature::new("f").param(Parameter::positional_only("a"));
        let err = sig.bind(Arguments::new().kwarg("a", 1)).unwrap_err();
        assert_eq!(err, BindError::UnexpectedKeyword { function: "f".into(), name: "a".into() });
    }
}
