//! Explanation traces.
//!
//! `explain` is an audit walk, not a decision path. It visits every nested
//! policy, including those `evaluate` would never reach because an ancestor or
//! an earlier sibling already decided, and it records what each visited policy
//! would decide on its own. Predicate failures are reported as
//! [`EvaluationError`] instead of being folded into `Undefined`.

use std::fmt;

use alfa_condition::Condition;

use crate::decision::{DecisionMergeStrategy, PolicyResult};
use crate::error::EvaluationError;
use crate::policy::{Policy, Subject};
use crate::resolver::{Resolver, resolved};

/// One visited policy in an explanation trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainRecord {
    /// Hint rendered with applicability and clarification.
    pub policy_hint: String,
    /// Nesting depth, 0 for the root policy.
    pub level: usize,
    /// What this policy decides when evaluated on its own.
    pub result: PolicyResult,
    pub merge_strategy: DecisionMergeStrategy,
    /// Outcome of each local condition. Empty when the policy is not applicable.
    pub conditions: Vec<ConditionExplainRecord>,
}

/// Outcome of one local condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionExplainRecord {
    pub condition_hint: String,
    pub condition_result: Condition,
}

impl<T: Subject> Policy<T> {
    /// Produces the audit trace of this policy and all of its descendants, in
    /// pre-order.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationError`] when an applicability or condition predicate
    /// fails anywhere in the tree, wrapped once per nesting level.
    pub fn explain(
        &self,
        data: &T,
        resolver: Option<&dyn Resolver>,
    ) -> Result<Vec<ExplainRecord>, EvaluationError> {
        let mut records = Vec::new();
        self.explain_into(data, resolver, 0, &mut records)?;
        Ok(records)
    }

    pub(crate) fn explain_into(
        &self,
        data: &T,
        resolver: Option<&dyn Resolver>,
        level: usize,
        acc: &mut Vec<ExplainRecord>,
    ) -> Result<(), EvaluationError> {
        let resolved = resolved(data, resolver);
        let failed =
            |source| EvaluationError::predicate(self.hint.to_string(), format!("{resolved:?}"), source);

        let applicable = self.applicability.test(&resolved).map_err(failed)?;
        let applicability = Condition::from_bool(applicable);

        let (result, conditions) = if applicable {
            let mut conditions = Vec::with_capacity(self.conditions.len());
            for condition in &self.conditions {
                let holds = condition.test(&resolved).map_err(failed)?;
                conditions.push(ConditionExplainRecord {
                    condition_hint: condition.hint().render(Some(&resolved), None),
                    condition_result: Condition::from_bool(holds),
                });
            }
            (self.evaluate(&resolved, resolver), conditions)
        } else {
            let result =
                PolicyResult::not_applicable(format!("policy '{}' is not applicable", self.hint));
            (result, Vec::new())
        };

        acc.push(ExplainRecord {
            policy_hint: self.hint.render(Some(&resolved), Some(&applicability)),
            level,
            result,
            merge_strategy: self.merge_strategy,
            conditions,
        });

        for nested in &self.nested {
            nested
                .explain_into(&resolved, resolver, level + 1, acc)
                .map_err(|e| EvaluationError::Nested {
                    policy: self.hint.to_string(),
                    data: format!("{resolved:?}"),
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }
}

// ============================================================================
// Rendering
// ============================================================================

fn indent(level: usize) -> String {
    match level {
        0 => String::new(),
        1 => "├ ".to_string(),
        n => format!("├{} ", "─".repeat(n - 1)),
    }
}

impl fmt::Display for ExplainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}policy {}  (merging sub-policies as {}) => {}",
            indent(self.level),
            self.policy_hint,
            self.merge_strategy,
            self.result
        )?;
        for condition in &self.conditions {
            write!(
                f,
                "\n{}condition: {} => {}",
                indent(self.level + 1),
                condition.condition_hint,
                condition.condition_result
            )?;
        }
        Ok(())
    }
}

/// Renders a trace as an indented tree, one line per policy and condition.
pub fn render_explain(records: &[ExplainRecord]) -> String {
    records
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
