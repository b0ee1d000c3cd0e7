//! Policy reversal.
//!
//! Instead of deciding, reversal answers "under which condition would this
//! policy permit?" for partially known or absent subject data. Every predicate
//! that can be decided on the known data is decided; the rest is replaced by
//! the symbolic condition its reversal provider builds. The caller reduces the
//! result with [`ReversalEvaluationResult::condition_for_permit`] and
//! [`Condition::simplify`] before pushing it into an external filter.

use alfa_condition::Condition;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::decision::DecisionMergeStrategy;
use crate::policy::{Policy, Subject};
use crate::resolver::{Resolver, resolved};

/// Symbolic applicability and outcome of a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReversalEvaluationResult {
    /// When the policy applies. `NotApplicable` when it definitely does not.
    pub applicability_condition: Condition,
    /// When the policy permits, given that it applies. `None` for an
    /// inapplicable policy.
    pub resulting_condition: Option<Condition>,
}

impl ReversalEvaluationResult {
    pub fn new(applicability_condition: Condition, resulting_condition: Condition) -> Self {
        Self {
            applicability_condition,
            resulting_condition: Some(resulting_condition),
        }
    }

    /// A policy that definitely does not apply.
    pub fn not_applicable() -> Self {
        Self {
            applicability_condition: Condition::NotApplicable,
            resulting_condition: None,
        }
    }

    /// The full condition for a permit: the policy applies and its outcome permits.
    ///
    /// Not simplified; a missing outcome counts as `False`.
    pub fn condition_for_permit(&self) -> Condition {
        Condition::And(vec![
            self.applicability_condition.clone(),
            self.resulting_condition.clone().unwrap_or(Condition::False),
        ])
    }
}

impl<T: Subject> Policy<T> {
    /// Computes the symbolic permit condition of this policy.
    ///
    /// `data` may be absent entirely, or present with unresolved attributes.
    /// Never fails: predicates that cannot decide fall back to their reversal
    /// providers, and missing providers become `Undefined` leaves.
    pub fn evaluate_reversal(
        &self,
        data: Option<&T>,
        resolver: Option<&dyn Resolver>,
    ) -> ReversalEvaluationResult {
        let resolved = data.map(|d| resolved(d, resolver));
        let data = resolved.as_ref();

        let applicability = self.applicability_reversal(data, resolver);
        trace!(policy = %self.hint, applicability = %applicability, "applicability reversed");
        if applicability.is_not_applicable() {
            return ReversalEvaluationResult::not_applicable();
        }

        let resulting = self.nested_reversal(data, resolver);
        trace!(
            policy = %self.hint,
            strategy = %self.merge_strategy,
            resulting = %resulting,
            "policy reversed"
        );
        ReversalEvaluationResult::new(applicability, resulting)
    }

    fn applicability_reversal(&self, data: Option<&T>, resolver: Option<&dyn Resolver>) -> Condition {
        let Some(d) = data else {
            return self.applicability.reversal(None, &self.hint, resolver);
        };
        match self.applicability.test(d) {
            Ok(true) => Condition::True,
            Ok(false) => Condition::NotApplicable,
            Err(_) => self.applicability.reversal(data, &self.hint, resolver),
        }
    }

    fn nested_reversal(&self, data: Option<&T>, resolver: Option<&dyn Resolver>) -> Condition {
        match (self.nested.is_empty(), self.conditions.is_empty()) {
            (true, true) => match self.merge_strategy {
                DecisionMergeStrategy::FirstApplicable => Condition::NotApplicable,
                DecisionMergeStrategy::DenyUnlessPermit => Condition::False,
                DecisionMergeStrategy::PermitUnlessDeny => Condition::True,
            },
            (true, false) => self.conditions_reversal(data, resolver),
            (false, true) => self.merge(self.children_reversal(data, resolver)),
            (false, false) => {
                let mut children = self.children_reversal(data, resolver);
                children.push(ReversalEvaluationResult::new(
                    Condition::True,
                    self.conditions_reversal(data, resolver),
                ));
                self.merge(children)
            }
        }
    }

    fn children_reversal(
        &self,
        data: Option<&T>,
        resolver: Option<&dyn Resolver>,
    ) -> Vec<ReversalEvaluationResult> {
        self.nested
            .iter()
            .map(|nested| nested.evaluate_reversal(data, resolver))
            .collect()
    }

    /// AND of every local condition, each decided concretely when possible.
    fn conditions_reversal(&self, data: Option<&T>, resolver: Option<&dyn Resolver>) -> Condition {
        Condition::And(
            self.conditions
                .iter()
                .map(|condition| match condition.evaluate(data, &self.hint) {
                    Condition::Undefined(_) => condition.reversal(data, &self.hint, resolver),
                    decided => decided,
                })
                .collect(),
        )
    }

    fn merge(&self, children: Vec<ReversalEvaluationResult>) -> Condition {
        let remaining: Vec<ReversalEvaluationResult> = children
            .into_iter()
            .filter(|child| !child.applicability_condition.is_not_applicable())
            .collect();
        trace!(policy = %self.hint, children = remaining.len(), "merging reversed children");
        if remaining.is_empty() {
            return Condition::NotApplicable;
        }

        match self.merge_strategy {
            DecisionMergeStrategy::FirstApplicable => first_applicable(&remaining),
            DecisionMergeStrategy::DenyUnlessPermit => Condition::Or(
                remaining
                    .iter()
                    .map(ReversalEvaluationResult::condition_for_permit)
                    .collect(),
            ),
            DecisionMergeStrategy::PermitUnlessDeny => Condition::And(
                remaining
                    .iter()
                    .map(ReversalEvaluationResult::condition_for_permit)
                    .collect(),
            ),
        }
    }
}

/// `OR` over "child i permits and no earlier child applies".
fn first_applicable(children: &[ReversalEvaluationResult]) -> Condition {
    Condition::Or(
        children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                if i == 0 {
                    return child.condition_for_permit();
                }
                let mut term: Vec<Condition> = vec![child.condition_for_permit()];
                term.extend(
                    children[..i]
                        .iter()
                        .map(|earlier| !earlier.applicability_condition.clone()),
                );
                Condition::And(term)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::require;
    use alfa_condition::p;

    #[derive(Debug, Clone, Default)]
    struct Item {
        scope: Option<String>,
        quantity: Option<i64>,
    }

    fn corporate_scope() -> Policy<Item> {
        Policy::builder()
            .hint("corporate scope")
            .reversible_condition(
                |i: &Item| Ok(require(&i.scope, "scope")? == "Corporate"),
                "scope is corporate",
                |_, _| p("scope").eq("Corporate"),
            )
            .build()
    }

    #[test]
    fn test_condition_for_permit() {
        let applicable = ReversalEvaluationResult::new(Condition::True, p("a").eq("1"));
        assert_eq!(applicable.condition_for_permit().simplify(), p("a").eq("1"));
        assert_eq!(
            ReversalEvaluationResult::not_applicable().condition_for_permit().simplify(),
            Condition::False
        );
    }

    #[test]
    fn test_unresolved_condition_uses_provider() {
        let result = corporate_scope().evaluate_reversal(None, None);
        assert_eq!(result.applicability_condition, Condition::True);
        assert_eq!(result.condition_for_permit().simplify(), p("scope").eq("Corporate"));
    }

    #[test]
    fn test_known_data_decides_concretely() {
        let policy = corporate_scope();
        let corporate = Item {
            scope: Some("Corporate".to_string()),
            ..Item::default()
        };
        let retail = Item {
            scope: Some("Retail".to_string()),
            ..Item::default()
        };
        assert_eq!(
            policy.evaluate_reversal(Some(&corporate), None).condition_for_permit().simplify(),
            Condition::True
        );
        assert_eq!(
            policy.evaluate_reversal(Some(&retail), None).condition_for_permit().simplify(),
            Condition::False
        );
    }

    #[test]
    fn test_missing_provider_is_undefined() {
        let policy = Policy::builder()
            .hint("stock")
            .condition(|i: &Item| Ok(*require(&i.quantity, "quantity")? > 0), "in stock")
            .build();
        let permit = policy.evaluate_reversal(None, None).condition_for_permit().simplify();
        assert_eq!(permit, Condition::undefined("stock [in stock is undefined]"));
    }

    #[test]
    fn test_empty_policy_baselines() {
        let fa: Policy<Item> = Policy::builder().first_applicable().build();
        let dup: Policy<Item> = Policy::builder().deny_unless_permit().build();
        let pud: Policy<Item> = Policy::builder().permit_unless_deny().build();

        assert_eq!(
            fa.evaluate_reversal(None, None).resulting_condition,
            Some(Condition::NotApplicable)
        );
        assert_eq!(
            dup.evaluate_reversal(None, None),
            ReversalEvaluationResult::new(Condition::True, Condition::False)
        );
        assert_eq!(
            pud.evaluate_reversal(None, None).resulting_condition,
            Some(Condition::True)
        );
    }

    #[test]
    fn test_inapplicable_policy_short_circuits() {
        let policy = Policy::builder()
            .applicable_when(|i: &Item| Ok(i.quantity.is_some()))
            .permit()
            .build();
        assert_eq!(
            policy.evaluate_reversal(Some(&Item::default()), None),
            ReversalEvaluationResult::not_applicable()
        );
    }

    #[test]
    fn test_applicability_without_provider_on_absent_data() {
        let policy = Policy::builder()
            .hint("restricted")
            .applicable_when(|i: &Item| Ok(i.quantity.is_some()))
            .permit()
            .build();
        assert_eq!(
            policy.evaluate_reversal(None, None).applicability_condition,
            Condition::undefined("restricted")
        );
    }

    #[test]
    fn test_first_applicable_term_order() {
        let a = ReversalEvaluationResult::new(p("a").eq("1"), p("x").eq("1"));
        let b = ReversalEvaluationResult::new(p("b").eq("1"), p("y").eq("1"));
        let merged = first_applicable(&[a.clone(), b.clone()]);
        assert_eq!(
            merged,
            Condition::Or(vec![
                a.condition_for_permit(),
                Condition::And(vec![b.condition_for_permit(), !p("a").eq("1")]),
            ])
        );
        assert_eq!(
            merged.simplify().to_string(),
            "((a = '1' and x = '1') or ((b = '1' and y = '1') and a != '1'))"
        );
    }

    #[test]
    fn test_merge_drops_inapplicable_children() {
        let stocked = Policy::builder()
            .applicable_when(|i: &Item| Ok(i.quantity.is_some()))
            .permit()
            .build();
        let parent = Policy::builder()
            .deny_unless_permit()
            .policy(stocked, |i: &Item| Some(i.clone()))
            .build();
        assert_eq!(
            parent.evaluate_reversal(Some(&Item::default()), None).resulting_condition,
            Some(Condition::NotApplicable)
        );
    }

    #[test]
    fn test_unprojected_child_reverses_on_absent_data() {
        let parent = Policy::builder()
            .deny_unless_permit()
            .policy(corporate_scope(), |_: &Item| None::<Item>)
            .build();
        assert_eq!(
            parent
                .evaluate_reversal(Some(&Item::default()), None)
                .condition_for_permit()
                .simplify(),
            p("scope").eq("Corporate")
        );
        assert_eq!(
            parent.evaluate_reversal(None, None).condition_for_permit().simplify(),
            p("scope").eq("Corporate")
        );
    }

    #[test]
    fn test_strategies_combine_children() {
        let dup = Policy::builder()
            .deny_unless_permit()
            .policy(corporate_scope(), |i: &Item| Some(i.clone()))
            .condition(|i: &Item| Ok(i.quantity == Some(1)), "single item")
            .build();
        let pud = Policy::builder()
            .permit_unless_deny()
            .policy(corporate_scope(), |i: &Item| Some(i.clone()))
            .condition(|i: &Item| Ok(i.quantity == Some(1)), "single item")
            .build();
        let data = Item {
            quantity: Some(1),
            ..Item::default()
        };

        assert_eq!(
            dup.evaluate_reversal(Some(&data), None).condition_for_permit().simplify(),
            Condition::True
        );
        assert_eq!(
            pud.evaluate_reversal(Some(&data), None).condition_for_permit().simplify(),
            p("scope").eq("Corporate")
        );
    }
}
