//! Policy definitions.
//!
//! A [`Policy`] is built once and evaluated many times. It owns its hint, its
//! applicability test, its merge strategy, its ordered terminal conditions and
//! its ordered nested policies. Each nested policy is paired with a projection
//! from the parent subject into the child's subject type.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use alfa_condition::Condition;

use crate::decision::{DecisionMergeStrategy, PolicyResult};
use crate::error::{EvaluationError, PredicateResult};
use crate::explain::ExplainRecord;
use crate::expression::{Applicability, PolicyCondition};
use crate::hint::PolicyHint;
use crate::resolver::{Resolver, resolved};
use crate::reversal::ReversalEvaluationResult;

/// Subject data a policy can be evaluated against.
///
/// `Any` lets resolvers dispatch on the concrete type, `Debug` feeds
/// explanation failures, `Send + Sync` keeps policies shareable across threads.
pub trait Subject: Any + Clone + fmt::Debug + Send + Sync {}

impl<T: Any + Clone + fmt::Debug + Send + Sync> Subject for T {}

/// Maps a parent subject to a nested policy's subject.
///
/// `None` means the nested policy does not pertain to this subject. During
/// reversal the data is partial, so `None` means the child's data is unknown
/// and the child reverses on absent data.
pub type Projection<T, X> = Arc<dyn Fn(&T) -> Option<X> + Send + Sync>;

// ============================================================================
// Policy
// ============================================================================

/// An attribute-based access control policy over subject type `T`.
pub struct Policy<T> {
    pub(crate) hint: PolicyHint<T>,
    pub(crate) applicability: Applicability<T>,
    pub(crate) merge_strategy: DecisionMergeStrategy,
    pub(crate) conditions: Vec<PolicyCondition<T>>,
    pub(crate) nested: Vec<Box<dyn NestedEntry<T>>>,
}

impl<T: Subject> Policy<T> {
    pub fn hint(&self) -> &PolicyHint<T> {
        &self.hint
    }

    pub fn merge_strategy(&self) -> DecisionMergeStrategy {
        self.merge_strategy
    }

    pub fn conditions(&self) -> &[PolicyCondition<T>] {
        &self.conditions
    }

    /// Number of directly nested policies.
    pub fn nested_len(&self) -> usize {
        self.nested.len()
    }

    /// Runs the applicability test: `True`, `False`, or `Undefined` when the
    /// predicate cannot decide. Never consults the reversal provider.
    pub fn is_applicable(&self, data: &T) -> Condition {
        self.applicability.evaluate(data, &self.hint)
    }
}

impl<T> fmt::Debug for Policy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("hint", &self.hint.name())
            .field("merge_strategy", &self.merge_strategy)
            .field("conditions", &self.conditions.len())
            .field("nested", &self.nested.len())
            .finish()
    }
}

// ============================================================================
// Nested policies
// ============================================================================

/// A nested policy with its subject type erased behind the projection.
pub(crate) trait NestedEntry<T>: Send + Sync {
    fn hint(&self) -> String;

    /// Concrete applicability of the child on the projected, resolved subject.
    fn test_applicability(&self, data: &T, resolver: Option<&dyn Resolver>) -> PredicateResult;

    fn evaluate(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult;

    fn explain_into(
        &self,
        data: &T,
        resolver: Option<&dyn Resolver>,
        level: usize,
        acc: &mut Vec<ExplainRecord>,
    ) -> Result<(), EvaluationError>;

    fn evaluate_reversal(
        &self,
        data: Option<&T>,
        resolver: Option<&dyn Resolver>,
    ) -> ReversalEvaluationResult;
}

pub(crate) struct NestedPolicy<X, T> {
    policy: Policy<X>,
    projection: Projection<T, X>,
}

impl<X, T> NestedPolicy<X, T> {
    pub(crate) fn new(policy: Policy<X>, projection: Projection<T, X>) -> Self {
        Self { policy, projection }
    }
}

impl<X: Subject, T: Subject> NestedEntry<T> for NestedPolicy<X, T> {
    fn hint(&self) -> String {
        self.policy.hint.to_string()
    }

    fn test_applicability(&self, data: &T, resolver: Option<&dyn Resolver>) -> PredicateResult {
        match (self.projection)(data) {
            Some(projected) => self.policy.applicability.test(&resolved(&projected, resolver)),
            None => Ok(false),
        }
    }

    fn evaluate(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        match (self.projection)(data) {
            Some(projected) => self.policy.evaluate(&projected, resolver),
            None => PolicyResult::not_applicable(format!(
                "policy '{}' does not pertain to this subject",
                self.policy.hint
            )),
        }
    }

    fn explain_into(
        &self,
        data: &T,
        resolver: Option<&dyn Resolver>,
        level: usize,
        acc: &mut Vec<ExplainRecord>,
    ) -> Result<(), EvaluationError> {
        match (self.projection)(data) {
            Some(projected) => self.policy.explain_into(&projected, resolver, level, acc),
            None => Ok(()),
        }
    }

    fn evaluate_reversal(
        &self,
        data: Option<&T>,
        resolver: Option<&dyn Resolver>,
    ) -> ReversalEvaluationResult {
        let projected = data.and_then(|d| (self.projection)(d));
        self.policy.evaluate_reversal(projected.as_ref(), resolver)
    }
}
