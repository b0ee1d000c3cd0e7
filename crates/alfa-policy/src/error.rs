//! Error types for policy evaluation.
//!
//! Three outcomes are kept apart: a predicate that cannot decide
//! ([`PolicyError`], degraded to `Undefined` by `evaluate` and reversal), a
//! broken audit trail ([`EvaluationError`], raised by `explain` only) and an
//! enforcement refusal ([`EnforcementError`]).

use thiserror::Error;

/// Failure raised by an applicability predicate or a condition predicate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A required attribute of the subject was not resolved.
    #[error("attribute '{attribute}' is not resolved")]
    UnresolvedAttribute { attribute: String },

    /// The predicate could not be evaluated for another reason.
    #[error("predicate failed: {0}")]
    PredicateFailed(String),
}

/// Result type for predicates.
pub type PredicateResult = std::result::Result<bool, PolicyError>;

/// Returns the attribute value or an [`PolicyError::UnresolvedAttribute`].
///
/// ```
/// use alfa_policy::error::{PolicyError, require};
///
/// let rating: Option<u32> = None;
/// assert_eq!(
///     require(&rating, "creditRating"),
///     Err(PolicyError::UnresolvedAttribute { attribute: "creditRating".to_string() })
/// );
/// ```
pub fn require<'a, V>(value: &'a Option<V>, attribute: &str) -> Result<&'a V, PolicyError> {
    value.as_ref().ok_or_else(|| PolicyError::UnresolvedAttribute {
        attribute: attribute.to_string(),
    })
}

/// Failure while building an explanation trace.
///
/// Unlike `evaluate`, `explain` does not degrade failures: a broken audit
/// trail is reported to the caller.
#[derive(Debug, Error)]
pub enum EvaluationError {
    /// A predicate of this policy needed an attribute the data did not carry.
    #[error(
        "error evaluating policy '{policy}' on data = {data}, most likely the data was not resolved properly"
    )]
    Unresolved {
        policy: String,
        data: String,
        #[source]
        source: PolicyError,
    },

    /// A predicate of this policy failed on fully resolved attributes.
    #[error("error evaluating policy '{policy}' on data = {data}, predicate failed")]
    PredicateFailed {
        policy: String,
        data: String,
        #[source]
        source: PolicyError,
    },

    /// A nested policy failed.
    #[error("error evaluating policy '{policy}' on data = {data}, nested policy failed")]
    Nested {
        policy: String,
        data: String,
        #[source]
        source: Box<EvaluationError>,
    },
}

impl EvaluationError {
    /// Wraps a predicate failure of `policy`, keeping unresolved attributes
    /// apart from other failures.
    pub fn predicate(policy: String, data: String, source: PolicyError) -> Self {
        match source {
            PolicyError::UnresolvedAttribute { .. } => Self::Unresolved {
                policy,
                data,
                source,
            },
            PolicyError::PredicateFailed(_) => Self::PredicateFailed {
                policy,
                data,
                source,
            },
        }
    }
}

/// Error returned by the enforcement front-end.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnforcementError {
    /// The policy denied the request.
    #[error("Access denied: {reason}")]
    AccessDenied { reason: String },

    /// The policy could not decide. Never to be treated as a permit.
    #[error("Access undetermined: {reason}")]
    Undetermined { reason: String },

    /// The policy does not apply and the configuration refuses such requests.
    #[error("Policy not applicable: {reason}")]
    NotApplicable { reason: String },
}
