//! Decision model.
//!
//! A single evaluation produces exactly one [`PolicyResult`]. Policies combine
//! the decisions of their nested policies and local conditions according to a
//! [`DecisionMergeStrategy`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

// ============================================================================
// PolicyResult
// ============================================================================

/// The outcome of evaluating a policy against concrete subject data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyResult {
    Permit,
    Deny {
        message: String,
    },
    /// The policy does not pertain to the subject. A routing signal, not an error.
    NotApplicable {
        message: String,
    },
    /// The policy could not reach a decision. Callers must not read this as
    /// either `Permit` or `Deny`.
    Undefined {
        message: String,
        cause: Option<PolicyError>,
    },
}

impl PolicyResult {
    pub fn deny(message: impl Into<String>) -> Self {
        Self::Deny {
            message: message.into(),
        }
    }

    pub fn not_applicable(message: impl Into<String>) -> Self {
        Self::NotApplicable {
            message: message.into(),
        }
    }

    pub fn undefined(message: impl Into<String>) -> Self {
        Self::Undefined {
            message: message.into(),
            cause: None,
        }
    }

    /// An `Undefined` result carrying the failure that produced it.
    pub fn undefined_with_cause(message: impl Into<String>, cause: PolicyError) -> Self {
        Self::Undefined {
            message: message.into(),
            cause: Some(cause),
        }
    }

    pub fn is_permit(&self) -> bool {
        matches!(self, Self::Permit)
    }

    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    pub fn is_not_applicable(&self) -> bool {
        matches!(self, Self::NotApplicable { .. })
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }
}

impl fmt::Display for PolicyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permit => f.write_str("permit"),
            Self::Deny { message } => write!(f, "deny ({message})"),
            Self::NotApplicable { message } => write!(f, "not applicable ({message})"),
            Self::Undefined { message, .. } => write!(f, "undefined ({message})"),
        }
    }
}

// ============================================================================
// DecisionMergeStrategy
// ============================================================================

/// How a policy merges nested decisions and local conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionMergeStrategy {
    /// The first applicable nested policy decides; otherwise local conditions
    /// are combined with AND.
    #[default]
    FirstApplicable,
    /// Deny unless a nested policy or a local condition permits.
    DenyUnlessPermit,
    /// Permit unless a nested policy or a local condition denies.
    PermitUnlessDeny,
}

impl fmt::Display for DecisionMergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstApplicable => "first applicable",
            Self::DenyUnlessPermit => "deny, unless explicitly permitted",
            Self::PermitUnlessDeny => "permit, unless explicitly denied",
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
