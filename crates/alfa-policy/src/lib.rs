//! # alfa-policy: Attribute-based policies with reversal
//!
//! Policies are trees: each node has an applicability test, ordered terminal
//! conditions, ordered nested policies (each reached through a projection of
//! the subject) and a merge strategy combining them. A policy is evaluated on
//! concrete data, explained as an audit trace, or reversed into the symbolic
//! condition under which it would permit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Subject data (+ optional Resolver)          │
//! └──────┬──────────────┬───────────────┬───────┘
//!        │              │               │
//!        ▼              ▼               ▼
//! ┌────────────┐ ┌─────────────┐ ┌──────────────────────┐
//! │ evaluate   │ │ explain     │ │ evaluate_reversal    │
//! │ Permit /   │ │ audit trace │ │ partial or absent    │
//! │ Deny / N/A │ │ of every    │ │ data → Condition     │
//! │ / Undefined│ │ policy      │ │ for Permit           │
//! └─────┬──────┘ └─────────────┘ └──────────┬───────────┘
//!       │                                   │ simplify()
//!       ▼                                   ▼
//! ┌─────────────────────────────────────────────┐
//! │  PolicyEnforcer: allow/refuse, push-down     │
//! │  filters, audit events                       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Examples
//!
//! ```
//! use alfa_condition::{Condition, p};
//! use alfa_policy::{Policy, PolicyResult, require};
//!
//! #[derive(Debug, Clone)]
//! struct Product { scope: Option<String> }
//!
//! let corporate = Policy::builder()
//!     .hint("corporate products")
//!     .reversible_condition(
//!         |p: &Product| Ok(require(&p.scope, "scope")? == "Corporate"),
//!         "product scope is corporate",
//!         |_, _| p("product.scope").eq("Corporate"),
//!     )
//!     .build();
//!
//! let known = Product { scope: Some("Corporate".to_string()) };
//! assert_eq!(corporate.evaluate(&known, None), PolicyResult::Permit);
//!
//! // Nothing known about the product: the permit condition becomes a filter
//! let filter = corporate.evaluate_reversal(None, None).condition_for_permit().simplify();
//! assert_eq!(filter.to_string(), "product.scope = 'Corporate'");
//! ```

pub mod builder;
pub mod decision;
pub mod enforcement;
pub mod error;
pub mod evaluator;
pub mod explain;
pub mod expression;
pub mod hint;
pub mod policy;
pub mod resolver;
pub mod reversal;


pub use builder::PolicyBuilder;
pub use decision::{DecisionMergeStrategy, PolicyResult};
pub use enforcement::PolicyEnforcer;
pub use error::{EnforcementError, EvaluationError, PolicyError, PredicateResult, require};
pub use explain::{ConditionExplainRecord, ExplainRecord, render_explain};
pub use expression::{Applicability, PolicyCondition, Predicate, ReversalProvider};
pub use hint::{ConditionHint, PolicyHint};
pub use policy::{Policy, Projection, Subject};
pub use resolver::{Resolver, ResolverRegistry};
pub use reversal::ReversalEvaluationResult;
