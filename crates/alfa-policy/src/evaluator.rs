//! Policy evaluation engine.
//!
//! Evaluates a policy tree against concrete subject data. Evaluation is total:
//! every predicate failure degrades to [`PolicyResult::Undefined`] and nothing
//! is propagated to the caller.
//!
//! | Strategy           | Nested policies                         | Local conditions (fallback) |
//! |--------------------|-----------------------------------------|-----------------------------|
//! | `FirstApplicable`  | first applicable one decides            | AND; empty → NotApplicable  |
//! | `DenyUnlessPermit` | first Permit wins, Deny ignored          | OR; empty → Deny            |
//! | `PermitUnlessDeny` | first Deny wins, Permit ignored          | AND; empty → Permit         |

use alfa_condition::Condition;
use tracing::{debug, warn};

use crate::decision::{DecisionMergeStrategy, PolicyResult};
use crate::error::PolicyError;
use crate::expression::PolicyCondition;
use crate::policy::{NestedEntry, Policy, Subject};
use crate::resolver::{Resolver, resolved};

impl<T: Subject> Policy<T> {
    /// Evaluates the policy against `data`.
    ///
    /// The resolver, when supplied, enriches the subject before anything is tested.
    ///
    /// # Postcondition
    ///
    /// Always returns a `PolicyResult` -- predicate failures become `Undefined`.
    pub fn evaluate(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        let data = resolved(data, resolver);
        let result = self.evaluate_resolved(&data, resolver);
        debug!(
            policy = %self.hint,
            strategy = %self.merge_strategy,
            result = %result,
            "policy evaluated"
        );
        result
    }

    fn evaluate_resolved(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        match self.applicability.test(data) {
            Ok(true) => {}
            Ok(false) => {
                return PolicyResult::not_applicable(format!(
                    "policy '{}' is not applicable",
                    self.hint
                ));
            }
            Err(e) => {
                warn!(policy = %self.hint, error = %e, "applicability could not be decided");
                return PolicyResult::undefined_with_cause(format!("{} [{e}]", self.hint), e);
            }
        }

        match self.merge_strategy {
            DecisionMergeStrategy::FirstApplicable => self.first_applicable(data, resolver),
            DecisionMergeStrategy::DenyUnlessPermit => self.deny_unless_permit(data, resolver),
            DecisionMergeStrategy::PermitUnlessDeny => self.permit_unless_deny(data, resolver),
        }
    }

    fn first_applicable(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        for nested in &self.nested {
            match nested.test_applicability(data, resolver) {
                Ok(true) => return nested.evaluate(data, resolver),
                Ok(false) => {}
                Err(e) => return self.undefined_nested(nested.as_ref(), e),
            }
        }

        if self.conditions.is_empty() {
            return PolicyResult::not_applicable(format!(
                "policy '{}' is not applicable",
                self.hint
            ));
        }
        for condition in &self.conditions {
            match condition.test(data) {
                Ok(true) => {}
                Ok(false) => return self.deny_on(condition, data),
                Err(e) => return self.undefined_condition(condition, e),
            }
        }
        PolicyResult::Permit
    }

    fn deny_unless_permit(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        for nested in &self.nested {
            match nested.test_applicability(data, resolver) {
                Ok(true) => match nested.evaluate(data, resolver) {
                    PolicyResult::Permit => return PolicyResult::Permit,
                    undefined @ PolicyResult::Undefined { .. } => return undefined,
                    PolicyResult::Deny { .. } | PolicyResult::NotApplicable { .. } => {}
                },
                Ok(false) => {}
                Err(e) => return self.undefined_nested(nested.as_ref(), e),
            }
        }

        if self.conditions.is_empty() {
            return PolicyResult::deny(format!("policy '{}' permits nothing", self.hint));
        }
        for condition in &self.conditions {
            match condition.test(data) {
                Ok(true) => return PolicyResult::Permit,
                Ok(false) => {}
                Err(e) => return self.undefined_condition(condition, e),
            }
        }
        PolicyResult::deny(self.hint.render(Some(data), None))
    }

    fn permit_unless_deny(&self, data: &T, resolver: Option<&dyn Resolver>) -> PolicyResult {
        for nested in &self.nested {
            match nested.test_applicability(data, resolver) {
                Ok(true) => match nested.evaluate(data, resolver) {
                    deny @ PolicyResult::Deny { .. } => return deny,
                    undefined @ PolicyResult::Undefined { .. } => return undefined,
                    PolicyResult::Permit | PolicyResult::NotApplicable { .. } => {}
                },
                Ok(false) => {}
                Err(e) => return self.undefined_nested(nested.as_ref(), e),
            }
        }

        for condition in &self.conditions {
            match condition.test(data) {
                Ok(true) => {}
                Ok(false) => return self.deny_on(condition, data),
                Err(e) => return self.undefined_condition(condition, e),
            }
        }
        PolicyResult::Permit
    }

    fn deny_on(&self, condition: &PolicyCondition<T>, data: &T) -> PolicyResult {
        PolicyResult::deny(format!(
            "{} [ {} ]",
            self.hint,
            condition.hint().render(Some(data), Some(&Condition::False))
        ))
    }

    fn undefined_condition(&self, condition: &PolicyCondition<T>, e: PolicyError) -> PolicyResult {
        warn!(
            policy = %self.hint,
            condition = %condition.hint(),
            error = %e,
            "condition could not be decided"
        );
        PolicyResult::undefined_with_cause(format!("{} [{} - {e}]", self.hint, condition.hint()), e)
    }

    fn undefined_nested(&self, nested: &dyn NestedEntry<T>, e: PolicyError) -> PolicyResult {
        warn!(
            policy = %self.hint,
            nested = %nested.hint(),
            error = %e,
            "nested applicability could not be decided"
        );
        PolicyResult::undefined_with_cause(format!("{} => {} [{e}]", self.hint, nested.hint()), e)
    }
}

// ============================================================================
// Tests
// ============================================================================
