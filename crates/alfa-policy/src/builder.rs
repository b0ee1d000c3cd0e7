//! Policy construction.
//!
//! ```
//! use alfa_policy::{Policy, PolicyResult, require};
//!
//! #[derive(Debug, Clone)]
//! struct Product { quantity: Option<u32> }
//!
//! let policy = Policy::builder()
//!     .hint("special products")
//!     .permit_unless_deny()
//!     .condition(|p: &Product| Ok(*require(&p.quantity, "quantity")? > 0), "must be in stock")
//!     .build();
//!
//! assert_eq!(policy.evaluate(&Product { quantity: Some(3) }, None), PolicyResult::Permit);
//! assert!(policy.evaluate(&Product { quantity: Some(0) }, None).is_deny());
//! ```

use std::sync::Arc;

use alfa_condition::Condition;

use crate::decision::DecisionMergeStrategy;
use crate::error::PredicateResult;
use crate::expression::{Applicability, PolicyCondition, infallible, predicate, reversal};
use crate::hint::{ConditionHint, PolicyHint};
use crate::policy::{NestedEntry, NestedPolicy, Policy, Subject};
use crate::resolver::Resolver;

/// Consuming builder for [`Policy`].
#[must_use]
pub struct PolicyBuilder<T> {
    hint: PolicyHint<T>,
    applicability: Applicability<T>,
    merge_strategy: DecisionMergeStrategy,
    conditions: Vec<PolicyCondition<T>>,
    nested: Vec<Box<dyn NestedEntry<T>>>,
}

impl<T: Subject> Policy<T> {
    /// Starts an always-applicable, first-applicable policy with no conditions.
    pub fn builder() -> PolicyBuilder<T> {
        PolicyBuilder::new()
    }
}

impl<T: Subject> Default for PolicyBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Subject> PolicyBuilder<T> {
    pub fn new() -> Self {
        Self {
            hint: PolicyHint::default(),
            applicability: Applicability::always(),
            merge_strategy: DecisionMergeStrategy::default(),
            conditions: Vec::new(),
            nested: Vec::new(),
        }
    }

    pub fn hint(mut self, name: impl Into<String>) -> Self {
        self.hint = PolicyHint::new(name);
        self
    }

    /// Names the policy and renders subject detail next to the name.
    pub fn hint_with<F>(mut self, name: impl Into<String>, clarification: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.hint = PolicyHint::with_clarification(name, clarification);
        self
    }

    /// Restricts the policy to subjects satisfying `applicable`.
    ///
    /// Without a reversal provider the policy's applicability reverses to
    /// `Undefined` whenever the predicate cannot decide.
    pub fn applicable_when<P>(mut self, applicable: P) -> Self
    where
        P: Fn(&T) -> PredicateResult + Send + Sync + 'static,
    {
        self.applicability = Applicability::new(predicate(applicable), None);
        self
    }

    pub fn applicable_when_reversible<P, R>(mut self, applicable: P, provider: R) -> Self
    where
        P: Fn(&T) -> PredicateResult + Send + Sync + 'static,
        R: Fn(Option<&T>, Option<&dyn Resolver>) -> Condition + Send + Sync + 'static,
    {
        self.applicability = Applicability::new(predicate(applicable), Some(reversal(provider)));
        self
    }

    pub fn merge_policies_as(mut self, strategy: DecisionMergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    pub fn first_applicable(self) -> Self {
        self.merge_policies_as(DecisionMergeStrategy::FirstApplicable)
    }

    pub fn deny_unless_permit(self) -> Self {
        self.merge_policies_as(DecisionMergeStrategy::DenyUnlessPermit)
    }

    pub fn permit_unless_deny(self) -> Self {
        self.merge_policies_as(DecisionMergeStrategy::PermitUnlessDeny)
    }

    /// Adds a terminal condition without a symbolic counterpart.
    pub fn condition<P>(self, condition: P, comment: impl Into<String>) -> Self
    where
        P: Fn(&T) -> PredicateResult + Send + Sync + 'static,
    {
        self.push(PolicyCondition::new(predicate(condition), ConditionHint::new(comment), None))
    }

    /// Adds a terminal condition whose hint renders subject detail.
    pub fn condition_with<P, F>(
        self,
        condition: P,
        comment: impl Into<String>,
        clarification: F,
    ) -> Self
    where
        P: Fn(&T) -> PredicateResult + Send + Sync + 'static,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.push(PolicyCondition::new(
            predicate(condition),
            ConditionHint::with_clarification(comment, clarification),
            None,
        ))
    }

    /// Adds a terminal condition with the condition it stands for when the data
    /// is partial or absent.
    pub fn reversible_condition<P, R>(
        self,
        condition: P,
        comment: impl Into<String>,
        provider: R,
    ) -> Self
    where
        P: Fn(&T) -> PredicateResult + Send + Sync + 'static,
        R: Fn(Option<&T>, Option<&dyn Resolver>) -> Condition + Send + Sync + 'static,
    {
        self.push(PolicyCondition::new(
            predicate(condition),
            ConditionHint::new(comment),
            Some(reversal(provider)),
        ))
    }

    /// Adds a condition that never holds.
    pub fn deny(self) -> Self {
        self.push(PolicyCondition::new(
            infallible(|_: &T| false),
            ConditionHint::new("always deny"),
            Some(reversal(|_: Option<&T>, _: Option<&dyn Resolver>| Condition::False)),
        ))
    }

    /// Adds a condition that always holds.
    pub fn permit(self) -> Self {
        self.push(PolicyCondition::new(
            infallible(|_: &T| true),
            ConditionHint::new("always permit"),
            Some(reversal(|_: Option<&T>, _: Option<&dyn Resolver>| Condition::True)),
        ))
    }

    /// Nests `child`, reached through `projection` from this policy's subject.
    pub fn policy<X, F>(mut self, child: Policy<X>, projection: F) -> Self
    where
        X: Subject,
        F: Fn(&T) -> Option<X> + Send + Sync + 'static,
    {
        self.nested
            .push(Box::new(NestedPolicy::new(child, Arc::new(projection))));
        self
    }

    pub fn build(self) -> Policy<T> {
        Policy {
            hint: self.hint,
            applicability: self.applicability,
            merge_strategy: self.merge_strategy,
            conditions: self.conditions,
            nested: self.nested,
        }
    }

    fn push(mut self, condition: PolicyCondition<T>) -> Self {
        self.conditions.push(condition);
        self
    }
}
