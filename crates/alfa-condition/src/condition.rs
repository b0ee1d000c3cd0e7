//! Condition tree definitions.
//!
//! A [`Condition`] is an immutable boolean expression over named attribute
//! predicates. Trees are rebuilt, never mutated, by every operation.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A de-duplicated, sorted set of attribute values.
///
/// Sorting keeps the canonical rendering deterministic.
pub type ValueSet = BTreeSet<String>;

// ============================================================================
// Parameter
// ============================================================================

/// An opaque named attribute, e.g. `product.scope`.
///
/// Two predicates over the same name, operator and operands are the same leaf.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Parameter(String);

impl Parameter {
    /// Creates a parameter with the given display name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the parameter name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// `parameter in (values)`.
    pub fn is_in<I, S>(&self, values: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::In(self.clone(), values.into_iter().map(Into::into).collect())
    }

    /// `not (parameter in (values))`.
    ///
    /// Built as a negation so the simplifier decides the final shape.
    pub fn is_not_in<I, S>(&self, values: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::Not(Box::new(self.is_in(values)))
    }

    /// `parameter = 'value'`.
    pub fn eq(&self, value: impl Into<String>) -> Condition {
        Condition::Equals(self.clone(), value.into())
    }

    /// `parameter != 'value'`.
    pub fn ne(&self, value: impl Into<String>) -> Condition {
        Condition::NotEquals(self.clone(), value.into())
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Parameter {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Parameter {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Shorthand for [`Parameter::new`].
pub fn p(name: impl Into<String>) -> Parameter {
    Parameter::new(name)
}

// ============================================================================
// Condition
// ============================================================================

/// A symbolic boolean condition over attribute predicates.
///
/// `Undefined` and `NotApplicable` are not booleans: the former means "could not
/// be resolved, here is why", the latter means "this branch contributes nothing"
/// and is pruned by the simplifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// The parameter's value is one of the set.
    In(Parameter, ValueSet),
    /// The parameter's value is none of the set.
    NotIn(Parameter, ValueSet),
    /// The parameter equals the value.
    Equals(Parameter, String),
    /// The parameter differs from the value.
    NotEquals(Parameter, String),

    /// All sub-conditions hold. An empty list is only meaningful to the simplifier.
    And(Vec<Condition>),
    /// At least one sub-condition holds. An empty list is only meaningful to the simplifier.
    Or(Vec<Condition>),
    /// The sub-condition does not hold.
    Not(Box<Condition>),

    True,
    False,
    /// Could not be resolved to `True` or `False`; carries a diagnostic.
    Undefined(String),
    /// The branch does not exist for this subject.
    NotApplicable,
}

impl Condition {
    /// Builds an `Undefined` leaf with the given diagnostic.
    pub fn undefined(comment: impl Into<String>) -> Self {
        Self::Undefined(comment.into())
    }

    /// Lifts a concrete boolean into `True`/`False`.
    pub fn from_bool(value: bool) -> Self {
        if value { Self::True } else { Self::False }
    }

    /// `(self and other)`.
    pub fn and(self, other: Condition) -> Self {
        Self::And(vec![self, other])
    }

    /// `(self or other)`.
    pub fn or(self, other: Condition) -> Self {
        Self::Or(vec![self, other])
    }

    /// Conjunction over any number of conditions.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::And(conditions.into_iter().collect())
    }

    /// Disjunction over any number of conditions.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Or(conditions.into_iter().collect())
    }

    pub fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    pub fn is_false(&self) -> bool {
        matches!(self, Self::False)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined(_))
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable)
    }
}

impl std::ops::Not for Condition {
    type Output = Condition;

    fn not(self) -> Self::Output {
        Condition::Not(Box::new(self))
    }
}

impl From<bool> for Condition {
    fn from(value: bool) -> Self {
        Self::from_bool(value)
    }
}

// ============================================================================
// Canonical rendering
// ============================================================================

fn write_values(f: &mut fmt::Formatter<'_>, values: &ValueSet) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "'{value}'")?;
    }
    f.write_str(")")
}

fn write_joined(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, condition) in conditions.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{condition}")?;
    }
    f.write_str(")")
}

/// Renders the condition as a query fragment, e.g. `(a = 'x' and b in ('y', 'z'))`.
impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In(param, values) => {
                write!(f, "{param} in ")?;
                write_values(f, values)
            }
            Self::NotIn(param, values) => {
                write!(f, "{param} not in ")?;
                write_values(f, values)
            }
            Self::Equals(param, value) => write!(f, "{param} = '{value}'"),
            Self::NotEquals(param, value) => write!(f, "{param} != '{value}'"),
            Self::And(conditions) => write_joined(f, conditions, " and "),
            Self::Or(conditions) => write_joined(f, conditions, " or "),
            Self::Not(inner) => write!(f, "not ({inner})"),
            Self::True => f.write_str("true"),
            Self::False => f.write_str("false"),
            Self::Undefined(comment) => write!(f, "undefined({comment})"),
            Self::NotApplicable => f.write_str("not_applicable"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
