//! Typed, validated strategy parameters.
//!
//! ## Overview
//!
//! A [`ParameterDescription`] names a parameter, fixes its type (integer or
//! real), and optionally bounds it and gives it a default. A
//! [`StrategyParameters`] bag holds values checked against their
//! descriptions. It is built once through [`ParametersBuilder`], which
//! rejects a name supplied twice.
//!
//! ## Usage
//!
//! ```
//! use game_arena::strategy::{ParameterDescription, StrategyParameters};
//!
//! let plies = ParameterDescription::int("pliesToLookAhead").with_min(1_i64);
//! let params = StrategyParameters::builder()
//!     .parse(&plies, "3")
//!     .unwrap()
//!     .build();
//! assert_eq!(params.get_int(&plies).unwrap(), 3);
//!
//! assert!(StrategyParameters::builder().parse(&plies, "0").is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Error, Result};

/// Type of a parameter's values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Int,
    Double,
}

impl ValueKind {
    fn label(self) -> &'static str {
        match self {
            ValueKind::Int => "integer",
            ValueKind::Double => "real",
        }
    }
}

/// A parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Int(i64),
    Double(f64),
}

impl ParameterValue {
    /// Type of this value.
    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            ParameterValue::Int(_) => ValueKind::Int,
            ParameterValue::Double(_) => ValueKind::Double,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            ParameterValue::Int(v) => v as f64,
            ParameterValue::Double(v) => v,
        }
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Int(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}

/// Formats so that [`ParameterDescription::parse`] reads the value back.
impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Int(v) => write!(f, "{v}"),
            ParameterValue::Double(v) => write!(f, "{v}"),
        }
    }
}

/// Name, type, bounds and default of one strategy parameter.
///
/// Bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParameterDescription {
    name: &'static str,
    kind: ValueKind,
    min: Option<ParameterValue>,
    max: Option<ParameterValue>,
    default: Option<ParameterValue>,
}

impl ParameterDescription {
    /// Describe an integer parameter.
    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, ValueKind::Int)
    }

    /// Describe a real-valued parameter.
    #[must_use]
    pub const fn double(name: &'static str) -> Self {
        Self::new(name, ValueKind::Double)
    }

    const fn new(name: &'static str, kind: ValueKind) -> Self {
        Self {
            name,
            kind,
            min: None,
            max: None,
            default: None,
        }
    }

    /// Set an inclusive lower bound.
    #[must_use]
    pub fn with_min(mut self, min: impl Into<ParameterValue>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set an inclusive upper bound.
    #[must_use]
    pub fn with_max(mut self, max: impl Into<ParameterValue>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Set the value used when none is supplied.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<ParameterValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    #[must_use]
    pub fn default_value(&self) -> Option<ParameterValue> {
        self.default
    }

    /// Check a value's type and bounds.
    ///
    /// Integers are accepted for real parameters and widened.
    pub fn validate(&self, value: ParameterValue) -> Result<ParameterValue> {
        let value = match (self.kind, value) {
            (ValueKind::Double, ParameterValue::Int(v)) => ParameterValue::Double(v as f64),
            (ValueKind::Int, ParameterValue::Double(_)) => {
                return Err(Error::ParameterType {
                    name: self.name.to_string(),
                    expected: self.kind.label(),
                    actual: value.kind().label(),
                })
            }
            _ => value,
        };

        if value.as_f64().is_nan() {
            return Err(Error::InvalidParameterValue {
                name: self.name.to_string(),
                text: value.to_string(),
            });
        }
        if let Some(min) = self.min {
            if value.as_f64() < min.as_f64() {
                return Err(self.out_of_bounds(format!("at least {min}"), value));
            }
        }
        if let Some(max) = self.max {
            if value.as_f64() > max.as_f64() {
                return Err(self.out_of_bounds(format!("at most {max}"), value));
            }
        }
        Ok(value)
    }

    fn out_of_bounds(&self, bound: String, value: ParameterValue) -> Error {
        Error::ParameterOutOfBounds {
            name: self.name.to_string(),
            bound,
            value: value.to_string(),
        }
    }

    /// Parse and validate a textual value.
    pub fn parse(&self, text: &str) -> Result<ParameterValue> {
        let invalid = || Error::InvalidParameterValue {
            name: self.name.to_string(),
            text: text.to_string(),
        };
        let value = match self.kind {
            ValueKind::Int => ParameterValue::Int(text.parse().map_err(|_| invalid())?),
            ValueKind::Double => ParameterValue::Double(text.parse().map_err(|_| invalid())?),
        };
        self.validate(value)
    }
}

/// An immutable bag of validated parameter values.
///
/// Values keep the order they were supplied in. Equality ignores order.
#[derive(Clone, Debug, Default)]
pub struct StrategyParameters {
    values: Vec<(ParameterDescription, ParameterValue)>,
}

impl StrategyParameters {
    /// Parameters with no values supplied.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    /// The explicitly supplied value for a parameter name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ParameterValue> {
        self.values
            .iter()
            .find(|(desc, _)| desc.name == name)
            .map(|&(_, value)| value)
    }

    /// Whether a value was supplied for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The supplied value, or the description's default.
    pub fn value(&self, desc: &ParameterDescription) -> Result<ParameterValue> {
        self.get(desc.name)
            .or(desc.default)
            .ok_or_else(|| Error::MissingParameter(desc.name.to_string()))
    }

    /// Integer value of a parameter, falling back to its default.
    pub fn get_int(&self, desc: &ParameterDescription) -> Result<i64> {
        match self.value(desc)? {
            ParameterValue::Int(v) => Ok(v),
            other => Err(Error::ParameterType {
                name: desc.name.to_string(),
                expected: ValueKind::Int.label(),
                actual: other.kind().label(),
            }),
        }
    }

    /// Real value of a parameter, falling back to its default.
    pub fn get_double(&self, desc: &ParameterDescription) -> Result<f64> {
        Ok(self.value(desc)?.as_f64())
    }

    /// Supplied (description, value) pairs in supply order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParameterDescription, ParameterValue)> {
        self.values.iter().map(|(desc, value)| (desc, *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy with one parameter set from text, replacing any earlier value.
    pub fn with_parsed(&self, desc: &ParameterDescription, text: &str) -> Result<Self> {
        let value = desc.parse(text)?;
        let mut values = self.values.clone();
        match values.iter_mut().find(|(d, _)| d.name == desc.name) {
            Some(entry) => *entry = (*desc, value),
            None => values.push((*desc, value)),
        }
        Ok(Self { values })
    }
}

impl PartialEq for StrategyParameters {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .all(|(desc, value)| other.get(desc.name) == Some(*value))
    }
}

/// Builder for [`StrategyParameters`].
#[derive(Debug, Default)]
pub struct ParametersBuilder {
    values: Vec<(ParameterDescription, ParameterValue)>,
}

impl ParametersBuilder {
    /// Add a validated value.
    pub fn put(mut self, desc: &ParameterDescription, value: impl Into<ParameterValue>) -> Result<Self> {
        if self.values.iter().any(|(d, _)| d.name == desc.name) {
            return Err(Error::DuplicateParameter(desc.name.to_string()));
        }
        let value = desc.validate(value.into())?;
        self.values.push((*desc, value));
        Ok(self)
    }

    /// Parse, validate and add a value.
    pub fn parse(self, desc: &ParameterDescription, text: &str) -> Result<Self> {
        let value = desc.parse(text)?;
        self.put(desc, value)
    }

    #[must_use]
    pub fn build(self) -> StrategyParameters {
        StrategyParameters {
            values: self.values,
        }
    }
}
