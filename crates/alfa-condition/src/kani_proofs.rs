//! Kani proofs for the condition simplifier
//!
//! Run with: `cargo kani --harness verify_*`

#[cfg(kani)]
use crate::condition::{Condition, p};

/// Proof #1: Simplification determinism
///
/// **Property**: The same tree always simplifies to the same result
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_simplify_determinism() {
    let flag: bool = kani::any();
    let c = Condition::all([
        Condition::from_bool(flag),
        !p("x").eq("1"),
        Condition::NotApplicable,
    ]);

    assert_eq!(c.simplify(), c.simplify());
}

/// Proof #2: Constant folding
///
/// **Property**: A conjunction containing `False` folds to `False`,
/// a disjunction containing `True` folds to `True`
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_constant_folding() {
    let flag: bool = kani::any();
    let leaf = Condition::from_bool(flag);

    assert_eq!(
        Condition::all([leaf.clone(), Condition::False]).simplify(),
        Condition::False
    );
    assert_eq!(
        Condition::any([leaf, Condition::True]).simplify(),
        Condition::True
    );
}

/// Proof #3: Double negation
///
/// **Property**: `not (not (c))` simplifies to `c` for concrete leaves
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_double_negation() {
    let flag: bool = kani::any();
    let c = Condition::from_bool(flag);

    assert_eq!((!!c.clone()).simplify(), c);
}
