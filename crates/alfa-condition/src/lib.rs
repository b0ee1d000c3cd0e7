//! # alfa-condition: Symbolic condition algebra
//!
//! The vocabulary policy reversal is expressed in. A reversal produces a
//! [`Condition`] tree over named attribute predicates; the caller simplifies it
//! and pushes it down into an external filter such as a SQL `WHERE` clause.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Reversal providers                          │
//! │  p("client.type").eq("corporate") ...        │
//! └─────────────────┬───────────────────────────┘
//!                   │
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Condition tree                              │
//! │  ├─ In / NotIn / Equals / NotEquals          │
//! │  ├─ And / Or / Not                           │
//! │  └─ True / False / Undefined / NotApplicable │
//! └─────────────────┬───────────────────────────┘
//!                   │  simplify() (fixpoint, capped)
//!                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  Canonical text                              │
//! │  (client.type = 'corporate' and ...)         │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//!
//! ```
//! use alfa_condition::{Condition, p};
//!
//! let filter = Condition::True
//!     .and(p("employee.division").is_in(["CorpSales"]).or(Condition::False));
//!
//! assert_eq!(filter.simplify().to_string(), "employee.division in ('CorpSales')");
//! ```

pub mod condition;
pub mod simplify;

#[cfg(test)]
mod tests;

// Kani proofs for bounded model checking
#[cfg(kani)]
mod kani_proofs;

pub use condition::{Condition, Parameter, ValueSet, p};
pub use simplify::{DEFAULT_MAX_PASSES, simplify_once};
