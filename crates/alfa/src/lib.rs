//! # alfa
//!
//! Attribute-based access control policies that can be evaluated, explained,
//! and reversed into query filters.
//!
//! A policy decides `Permit`, `Deny`, `NotApplicable` or `Undefined` for fully
//! known subject data. When only part of the data is known, for example an
//! employee listing the products they may sell, the same policy is reversed
//! into the condition under which it would permit. That condition renders as a
//! query fragment a database can filter on.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                           alfa                            │
//! │  ┌──────────────┐   ┌──────────────┐   ┌───────────────┐ │
//! │  │ alfa-policy  │ → │alfa-condition│ → │ query filter  │ │
//! │  │ (evaluate,   │   │ (symbolic    │   │ (rendered     │ │
//! │  │  reverse)    │   │  simplify)   │   │  condition)   │ │
//! │  └──────────────┘   └──────────────┘   └───────────────┘ │
//! │          ▲                                                │
//! │  ┌──────────────┐                                         │
//! │  │ alfa-config  │                                         │
//! │  └──────────────┘                                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use alfa::{Policy, PolicyEnforcer, p, require};
//!
//! #[derive(Debug, Clone)]
//! struct Product { corporate_only: Option<bool> }
//!
//! let retail = Policy::builder()
//!     .hint("retail products are always allowed for order")
//!     .applicable_when_reversible(
//!         |p: &Product| Ok(!*require(&p.corporate_only, "corporateOnly")?),
//!         |_, _| p("product.scope").is_not_in(["Corporate"]),
//!     )
//!     .permit()
//!     .build();
//!
//! let enforcer = PolicyEnforcer::new(Arc::new(retail)).without_audit();
//! assert!(enforcer.enforce(&Product { corporate_only: Some(false) }, None).is_ok());
//! assert!(enforcer.enforce(&Product { corporate_only: Some(true) }, None).is_err());
//! assert_eq!(
//!     enforcer.where_clause(None, None).unwrap(),
//!     "product.scope not in ('Corporate')"
//! );
//! ```

// Condition algebra
pub use alfa_condition::{Condition, DEFAULT_MAX_PASSES, Parameter, ValueSet, p};

// Policies
pub use alfa_policy::{
    Applicability, ConditionExplainRecord, ConditionHint, DecisionMergeStrategy,
    EnforcementError, EvaluationError, ExplainRecord, Policy, PolicyBuilder, PolicyCondition,
    PolicyEnforcer, PolicyError, PolicyHint, PolicyResult, PredicateResult, Projection, Resolver,
    ResolverRegistry, ReversalEvaluationResult, Subject, render_explain, require,
};

// Configuration
pub use alfa_config::{
    AlfaConfig, ConfigError, ConfigLayer, ConfigLoader, EnforcementConfig, NotApplicableEffect,
    SimplifyConfig,
};
