//! Fixpoint simplifier for condition trees.
//!
//! One pass prunes `NotApplicable` children, folds boolean constants, removes
//! identity elements and pushes negation into leaf predicates. Passes repeat
//! until the tree stops changing or the pass cap is reached.

use crate::condition::Condition;

/// Default cap on simplification passes.
pub const DEFAULT_MAX_PASSES: usize = 10;

impl Condition {
    /// Simplifies to a fixpoint, applying at most [`DEFAULT_MAX_PASSES`] passes.
    pub fn simplify(&self) -> Condition {
        self.simplify_with_limit(DEFAULT_MAX_PASSES)
    }

    /// Simplifies to a fixpoint, applying at most `max_passes` passes.
    ///
    /// At least one pass is always applied. When the cap is hit before the
    /// tree converges, the last result is returned.
    pub fn simplify_with_limit(&self, max_passes: usize) -> Condition {
        let mut current = simplify_once(self);
        for _ in 1..max_passes {
            let next = simplify_once(&current);
            if next == current {
                return current;
            }
            current = next;
        }
        current
    }
}

/// Applies a single reduction pass.
pub fn simplify_once(condition: &Condition) -> Condition {
    match condition {
        Condition::And(children) => {
            let remaining = simplify_children(children);
            if remaining.is_empty() {
                Condition::NotApplicable
            } else if remaining.iter().all(Condition::is_true) {
                Condition::True
            } else if remaining.iter().any(Condition::is_false) {
                Condition::False
            } else {
                rebuild(remaining, Condition::is_true, Condition::And)
            }
        }
        Condition::Or(children) => {
            let remaining = simplify_children(children);
            if remaining.is_empty() {
                Condition::NotApplicable
            } else if remaining.iter().any(Condition::is_true) {
                Condition::True
            } else if remaining.iter().all(Condition::is_false) {
                Condition::False
            } else {
                rebuild(remaining, Condition::is_false, Condition::Or)
            }
        }
        Condition::Not(inner) => match simplify_once(inner) {
            Condition::True => Condition::False,
            Condition::False => Condition::True,
            Condition::NotIn(param, values) => Condition::In(param, values),
            Condition::NotEquals(param, value) => Condition::Equals(param, value),
            Condition::In(param, values) => Condition::NotIn(param, values),
            Condition::Equals(param, value) => Condition::NotEquals(param, value),
            Condition::Not(double) => *double,
            other => Condition::Not(Box::new(other)),
        },
        Condition::In(..)
        | Condition::NotIn(..)
        | Condition::Equals(..)
        | Condition::NotEquals(..)
        | Condition::True
        | Condition::False
        | Condition::Undefined(_)
        | Condition::NotApplicable => condition.clone(),
    }
}

fn simplify_children(children: &[Condition]) -> Vec<Condition> {
    children
        .iter()
        .map(simplify_once)
        .filter(|c| !c.is_not_applicable())
        .collect()
}

/// Drops identity elements and collapses a single survivor into itself.
fn rebuild(
    remaining: Vec<Condition>,
    is_identity: fn(&Condition) -> bool,
    combine: fn(Vec<Condition>) -> Condition,
) -> Condition {
    let mut kept: Vec<Condition> = remaining.into_iter().filter(|c| !is_identity(c)).collect();
    if kept.len() == 1 {
        kept.remove(0)
    } else {
        combine(kept)
    }
}

// ============================================================================
// Tests
// ============================================================================
