//! Concrete predicates paired with their symbolic counterparts.
//!
//! Every applicability test and every policy condition is a capability pair:
//! a concrete predicate evaluated on resolved data, and an optional reversal
//! provider that yields a [`Condition`] when the concrete predicate cannot
//! decide. A missing provider defaults to an explicit `Undefined` leaf.

use std::sync::Arc;

use alfa_condition::Condition;

use crate::error::{PolicyError, PredicateResult};
use crate::hint::{ConditionHint, PolicyHint};
use crate::resolver::Resolver;

/// A concrete boolean predicate over subject data.
pub type Predicate<T> = Arc<dyn Fn(&T) -> PredicateResult + Send + Sync>;

/// Builds the symbolic condition for a predicate on partial or absent data.
pub type ReversalProvider<T> =
    Arc<dyn Fn(Option<&T>, Option<&dyn Resolver>) -> Condition + Send + Sync>;

// ============================================================================
// Applicability
// ============================================================================

/// The applicability test of a policy.
pub struct Applicability<T> {
    predicate: Predicate<T>,
    reversal: Option<ReversalProvider<T>>,
}

impl<T> Applicability<T> {
    pub fn new(predicate: Predicate<T>, reversal: Option<ReversalProvider<T>>) -> Self {
        Self {
            predicate,
            reversal,
        }
    }

    /// Applicable to every subject, concretely and symbolically.
    pub fn always() -> Self {
        Self {
            predicate: predicate(|_| Ok(true)),
            reversal: Some(reversal(|_, _| Condition::True)),
        }
    }

    /// Runs the concrete predicate.
    pub fn test(&self, data: &T) -> PredicateResult {
        (self.predicate)(data)
    }

    /// Runs the concrete predicate, mapping failures to `Undefined`.
    pub fn evaluate(&self, data: &T, policy_hint: &PolicyHint<T>) -> Condition {
        match self.test(data) {
            Ok(applicable) => Condition::from_bool(applicable),
            Err(e) => Condition::undefined(format!("{policy_hint} [{e}]")),
        }
    }

    /// Symbolic applicability, or `Undefined` tagged with the policy hint.
    pub fn reversal(
        &self,
        data: Option<&T>,
        policy_hint: &PolicyHint<T>,
        resolver: Option<&dyn Resolver>,
    ) -> Condition {
        match &self.reversal {
            Some(provider) => provider(data, resolver),
            None => Condition::undefined(policy_hint.to_string()),
        }
    }
}

impl<T> Clone for Applicability<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            reversal: self.reversal.clone(),
        }
    }
}

// ============================================================================
// PolicyCondition
// ============================================================================

/// A terminal condition of a policy.
pub struct PolicyCondition<T> {
    predicate: Predicate<T>,
    hint: ConditionHint<T>,
    reversal: Option<ReversalProvider<T>>,
}

impl<T> PolicyCondition<T> {
    pub fn new(
        predicate: Predicate<T>,
        hint: ConditionHint<T>,
        reversal: Option<ReversalProvider<T>>,
    ) -> Self {
        Self {
            predicate,
            hint,
            reversal,
        }
    }

    pub fn hint(&self) -> &ConditionHint<T> {
        &self.hint
    }

    /// Runs the concrete predicate.
    pub fn test(&self, data: &T) -> PredicateResult {
        (self.predicate)(data)
    }

    /// Evaluates on possibly absent data: `True`/`False`, or `Undefined` when
    /// the data is absent or the predicate fails.
    pub fn evaluate(&self, data: Option<&T>, policy_hint: &PolicyHint<T>) -> Condition {
        match data {
            None => Condition::undefined(format!(
                "{policy_hint} [{} - absent argument]",
                self.hint
            )),
            Some(d) => match self.test(d) {
                Ok(holds) => Condition::from_bool(holds),
                Err(e) => Condition::undefined(format!("{policy_hint} [{} - {e}]", self.hint)),
            },
        }
    }

    /// Symbolic condition, or `Undefined` tagged with both hints.
    pub fn reversal(
        &self,
        data: Option<&T>,
        policy_hint: &PolicyHint<T>,
        resolver: Option<&dyn Resolver>,
    ) -> Condition {
        match &self.reversal {
            Some(provider) => provider(data, resolver),
            None => Condition::undefined(format!("{policy_hint} [{} is undefined]", self.hint)),
        }
    }
}

impl<T> Clone for PolicyCondition<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            hint: self.hint.clone(),
            reversal: self.reversal.clone(),
        }
    }
}

/// Boxes a fallible closure as a [`Predicate`].
pub fn predicate<T, F>(f: F) -> Predicate<T>
where
    F: Fn(&T) -> PredicateResult + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wraps a plain boolean closure as an infallible [`Predicate`].
pub fn infallible<T, F>(f: F) -> Predicate<T>
where
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    predicate(move |data: &T| Ok::<bool, PolicyError>(f(data)))
}

/// Boxes a closure as a [`ReversalProvider`].
pub fn reversal<T, F>(f: F) -> ReversalProvider<T>
where
    F: Fn(Option<&T>, Option<&dyn Resolver>) -> Condition + Send + Sync + 'static,
{
    Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::require;
    use alfa_condition::p;

    struct Stock {
        quantity: Option<u32>,
    }

    fn in_stock(reversible: bool) -> PolicyCondition<Stock> {
        let provider: Option<ReversalProvider<Stock>> = if reversible {
            Some(reversal(|_, _| p("quantity").ne("0")))
        } else {
            None
        };
        PolicyCondition::new(
            predicate(|s: &Stock| Ok(*require(&s.quantity, "quantity")? > 0)),
            ConditionHint::new("in stock"),
            provider,
        )
    }

    #[test]
    fn test_condition_concrete_outcomes() {
        let hint = PolicyHint::new("stock policy");
        let c = in_stock(false);
        assert_eq!(c.evaluate(Some(&Stock { quantity: Some(3) }), &hint), Condition::True);
        assert_eq!(c.evaluate(Some(&Stock { quantity: Some(0) }), &hint), Condition::False);
    }

    #[test]
    fn test_condition_unresolved_is_undefined() {
        let hint = PolicyHint::new("stock policy");
        let c = in_stock(false);
        assert_eq!(
            c.evaluate(Some(&Stock { quantity: None }), &hint),
            Condition::undefined("stock policy [in stock - attribute 'quantity' is not resolved]")
        );
        assert_eq!(
            c.evaluate(None, &hint),
            Condition::undefined("stock policy [in stock - absent argument]")
        );
    }

    #[test]
    fn test_reversal_provider_and_fallback() {
        let hint = PolicyHint::new("stock policy");
        assert_eq!(in_stock(true).reversal(None, &hint, None), p("quantity").ne("0"));
        assert_eq!(
            in_stock(false).reversal(None, &hint, None),
            Condition::undefined("stock policy [in stock is undefined]")
        );
    }

    #[test]
    fn test_always_applicable() {
        let hint = PolicyHint::new("any");
        let a: Applicability<Stock> = Applicability::always();
        assert_eq!(a.evaluate(&Stock { quantity: None }, &hint), Condition::True);
        assert_eq!(a.reversal(None, &hint, None), Condition::True);
    }

    #[test]
    fn test_applicability_without_provider_is_undefined() {
        let hint = PolicyHint::new("restricted");
        let a: Applicability<Stock> = Applicability::new(infallible(|_| true), None);
        assert_eq!(a.reversal(None, &hint, None), Condition::undefined("restricted"));
    }
}
