//! Policy enforcement front-end.
//!
//! Turns the four-valued [`PolicyResult`] into an allow/refuse answer and
//! reversal results into filters for an external store. `Undefined` never
//! becomes a permit.

use std::sync::Arc;

use alfa_condition::Condition;
use alfa_config::{AlfaConfig, NotApplicableEffect};
use tracing::{info, warn};

use crate::decision::PolicyResult;
use crate::error::{EnforcementError, EvaluationError};
use crate::explain::ExplainRecord;
use crate::policy::{Policy, Subject};
use crate::resolver::Resolver;

/// Result type for enforcement operations.
pub type Result<T> = std::result::Result<T, EnforcementError>;

/// Policy enforcement engine.
///
/// Shares one immutable policy between any number of enforcers and threads.
pub struct PolicyEnforcer<T> {
    policy: Arc<Policy<T>>,
    config: AlfaConfig,
}

impl<T: Subject> PolicyEnforcer<T> {
    /// Creates an enforcer with the default configuration.
    pub fn new(policy: Arc<Policy<T>>) -> Self {
        Self::with_config(policy, AlfaConfig::default())
    }

    pub fn with_config(policy: Arc<Policy<T>>, config: AlfaConfig) -> Self {
        Self { policy, config }
    }

    /// Disables audit logging (for testing).
    pub fn without_audit(mut self) -> Self {
        self.config.enforcement.audit = false;
        self
    }

    pub fn policy(&self) -> &Policy<T> {
        &self.policy
    }

    pub fn config(&self) -> &AlfaConfig {
        &self.config
    }

    /// Enforces the policy on concrete subject data.
    ///
    /// Returns `Ok(())` if access is allowed, `Err` otherwise.
    ///
    /// **Audit:** Logs every decision.
    pub fn enforce(&self, data: &T, resolver: Option<&dyn Resolver>) -> Result<()> {
        let result = self.policy.evaluate(data, resolver);

        if self.config.enforcement.audit {
            match &result {
                PolicyResult::Permit => {
                    info!(policy = %self.policy.hint(), "Access granted");
                }
                other => {
                    warn!(policy = %self.policy.hint(), result = %other, "Access refused");
                }
            }
        }

        match result {
            PolicyResult::Permit => Ok(()),
            PolicyResult::Deny { message } => Err(EnforcementError::AccessDenied { reason: message }),
            PolicyResult::Undefined { message, .. } => {
                Err(EnforcementError::Undetermined { reason: message })
            }
            PolicyResult::NotApplicable { message } => match self.config.enforcement.not_applicable {
                NotApplicableEffect::Allow => Ok(()),
                NotApplicableEffect::Deny => Err(EnforcementError::NotApplicable { reason: message }),
            },
        }
    }

    /// The simplified condition under which the policy permits, for data with
    /// unknown attributes or no data at all.
    pub fn permit_filter(&self, partial: Option<&T>, resolver: Option<&dyn Resolver>) -> Condition {
        self.policy
            .evaluate_reversal(partial, resolver)
            .condition_for_permit()
            .simplify_with_limit(self.config.simplify.max_passes)
    }

    /// Renders the permit filter as a query predicate (without the `WHERE` keyword).
    ///
    /// # Errors
    ///
    /// - [`EnforcementError::Undetermined`] if the filter still contains an
    ///   `Undefined` leaf: it cannot be pushed down safely.
    /// - [`EnforcementError::AccessDenied`] if nothing can ever be permitted.
    /// - [`EnforcementError::NotApplicable`] if the policy does not apply and
    ///   the configuration refuses such requests.
    ///
    /// An unrestricted filter renders as `true`. An inapplicable policy renders
    /// as `true` when the configuration allows such requests.
    pub fn where_clause(
        &self,
        partial: Option<&T>,
        resolver: Option<&dyn Resolver>,
    ) -> Result<String> {
        let max_passes = self.config.simplify.max_passes;
        let reversal = self.policy.evaluate_reversal(partial, resolver);

        // decided before condition_for_permit folds NotApplicable away
        let not_applicable = reversal.applicability_condition.is_not_applicable()
            || reversal
                .resulting_condition
                .as_ref()
                .is_some_and(|c| c.simplify_with_limit(max_passes).is_not_applicable());
        if not_applicable {
            if self.config.enforcement.audit {
                warn!(policy = %self.policy.hint(), "Permit filter for inapplicable policy");
            }
            return match self.config.enforcement.not_applicable {
                NotApplicableEffect::Allow => Ok(Condition::True.to_string()),
                NotApplicableEffect::Deny => Err(EnforcementError::NotApplicable {
                    reason: format!("policy '{}' is not applicable", self.policy.hint()),
                }),
            };
        }

        let filter = reversal.condition_for_permit().simplify_with_limit(max_passes);
        if self.config.enforcement.audit {
            info!(policy = %self.policy.hint(), filter = %filter, "Permit filter generated");
        }

        if let Some(reason) = first_undefined(&filter) {
            return Err(EnforcementError::Undetermined {
                reason: reason.to_string(),
            });
        }
        match filter {
            Condition::False => Err(EnforcementError::AccessDenied {
                reason: format!("policy '{}' permits nothing", self.policy.hint()),
            }),
            other => Ok(other.to_string()),
        }
    }

    /// Full audit trace of the policy on `data`.
    ///
    /// # Errors
    ///
    /// See [`Policy::explain`].
    pub fn explain(
        &self,
        data: &T,
        resolver: Option<&dyn Resolver>,
    ) -> std::result::Result<Vec<ExplainRecord>, EvaluationError> {
        self.policy.explain(data, resolver)
    }
}

impl<T> Clone for PolicyEnforcer<T> {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
            config: self.config.clone(),
        }
    }
}

fn first_undefined(condition: &Condition) -> Option<&str> {
    match condition {
        Condition::Undefined(comment) => Some(comment),
        Condition::And(children) | Condition::Or(children) => {
            children.iter().find_map(first_undefined)
        }
        Condition::Not(inner) => first_undefined(inner),
        _ => None,
    }
}
