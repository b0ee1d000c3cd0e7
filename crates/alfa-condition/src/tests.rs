//! Property-based tests using proptest.
//!
//! Invariants of the simplifier that must hold for arbitrary trees.

use crate::condition::{Condition, p};
use crate::simplify::simplify_once;
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Condition> {
    prop_oneof![
        Just(Condition::True),
        Just(Condition::False),
        Just(Condition::NotApplicable),
        "[a-c]".prop_map(Condition::Undefined),
        ("[xyz]", "[0-2]").prop_map(|(name, v)| p(name).eq(v)),
        ("[xyz]", "[0-2]").prop_map(|(name, v)| p(name).ne(v)),
        ("[xyz]", prop::collection::btree_set("[0-2]", 0..3))
            .prop_map(|(name, vs)| Condition::In(p(name), vs)),
        ("[xyz]", prop::collection::btree_set("[0-2]", 0..3))
            .prop_map(|(name, vs)| Condition::NotIn(p(name), vs)),
    ]
}

fn tree() -> impl Strategy<Value = Condition> {
    leaf().prop_recursive(6, 64, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Condition::And),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Condition::Or),
            inner.prop_map(|c| !c),
        ]
    })
}

proptest! {
    /// Simplifying twice is the same as simplifying once.
    #[test]
    fn simplify_is_idempotent(c in tree()) {
        let once = c.simplify();
        prop_assert_eq!(once.simplify(), once);
    }

    /// The capped loop reaches a fixpoint: one more pass changes nothing.
    #[test]
    fn simplify_reaches_fixpoint(c in tree()) {
        let s = c.simplify();
        prop_assert_eq!(simplify_once(&s), s);
    }

    /// Double negation disappears.
    #[test]
    fn double_negation_eliminated(c in tree()) {
        prop_assert_eq!((!!c.clone()).simplify(), c.simplify());
    }

    /// `True` is the identity of `And`, `False` the identity of `Or`.
    #[test]
    fn identity_elements(c in tree()) {
        prop_assume!(!c.simplify().is_not_applicable());
        prop_assert_eq!(Condition::all([Condition::True, c.clone()]).simplify(), c.simplify());
        prop_assert_eq!(Condition::any([Condition::False, c.clone()]).simplify(), c.simplify());
    }

    /// `False` absorbs `And`, `True` absorbs `Or`, whatever else is present.
    #[test]
    fn absorbing_elements(cs in prop::collection::vec(tree(), 0..4), at in 0usize..4) {
        let mut with_false = cs.clone();
        with_false.insert(at.min(cs.len()), Condition::False);
        prop_assert_eq!(Condition::And(with_false).simplify(), Condition::False);

        let mut with_true = cs.clone();
        with_true.insert(at.min(cs.len()), Condition::True);
        prop_assert_eq!(Condition::Or(with_true).simplify(), Condition::True);
    }

    /// Simplified trees never keep `NotApplicable` inside a combinator.
    #[test]
    fn not_applicable_is_pruned(c in tree()) {
        fn has_nested_na(c: &Condition) -> bool {
            match c {
                Condition::And(cs) | Condition::Or(cs) => {
                    cs.iter().any(|x| x.is_not_applicable() || has_nested_na(x))
                }
                Condition::Not(inner) => has_nested_na(inner),
                _ => false,
            }
        }
        prop_assert!(!has_nested_na(&c.simplify()));
    }
}

/// `depth` levels of negations and identity-padded combinators around one leaf.
fn deep_tree(depth: usize) -> Condition {
    (0..depth).fold(p("x").eq("1"), |c, level| match level % 4 {
        0 => !c,
        1 => Condition::all([Condition::True, c]),
        2 => Condition::Or(vec![Condition::NotApplicable, Condition::False, c]),
        _ => Condition::And(vec![c]),
    })
}

#[test]
fn deep_tree_converges_within_pass_cap() {
    let deep = deep_tree(50);
    let simplified = deep.simplify();

    // 13 negations wrap the leaf
    assert_eq!(simplified, p("x").ne("1"));
    assert_eq!(simplified.simplify(), simplified);
    assert_eq!(simplify_once(&simplified), simplified);
}
