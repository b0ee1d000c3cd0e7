//! Human-readable hints attached to policies and conditions.
//!
//! Hints feed deny messages and explanation traces. The optional clarification
//! renders subject-specific detail, e.g. the product being checked.

use std::fmt;
use std::sync::Arc;

use alfa_condition::Condition;

type Clarification<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

fn render_parts(name: &str, status: Option<String>, clarification: Option<String>) -> String {
    if status.is_none() && clarification.is_none() {
        return name.to_string();
    }
    let mut out = format!("'{name}'");
    if let Some(status) = status {
        out.push_str(&format!(" [ {status} ]"));
    }
    if let Some(c) = clarification.filter(|c| !c.trim().is_empty()) {
        out.push_str(&format!(" ({c})"));
    }
    out
}

// ============================================================================
// PolicyHint
// ============================================================================

/// Name and optional per-subject clarification of a policy.
pub struct PolicyHint<T> {
    name: String,
    clarification: Option<Clarification<T>>,
}

impl<T> PolicyHint<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clarification: None,
        }
    }

    pub fn with_clarification(
        name: impl Into<String>,
        clarification: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            clarification: Some(Arc::new(clarification)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the hint, decorated with applicability and clarification when known.
    ///
    /// `'name' [ applicable ] (clarification)`; the bare name when neither the
    /// subject nor the applicability is supplied.
    pub fn render(&self, data: Option<&T>, applicability: Option<&Condition>) -> String {
        let status = applicability.map(|a| {
            if a.is_true() {
                "applicable".to_string()
            } else {
                "not applicable".to_string()
            }
        });
        let clarification = data.and_then(|d| self.clarification.as_ref().map(|c| c(d)));
        render_parts(&self.name, status, clarification)
    }
}

impl<T> Clone for PolicyHint<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            clarification: self.clarification.clone(),
        }
    }
}

impl<T> Default for PolicyHint<T> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<T> fmt::Display for PolicyHint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> fmt::Debug for PolicyHint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyHint").field("name", &self.name).finish_non_exhaustive()
    }
}

// ============================================================================
// ConditionHint
// ============================================================================

/// Name and optional per-subject clarification of a policy condition.
pub struct ConditionHint<T> {
    name: String,
    clarification: Option<Clarification<T>>,
}

impl<T> ConditionHint<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clarification: None,
        }
    }

    pub fn with_clarification(
        name: impl Into<String>,
        clarification: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            clarification: Some(Arc::new(clarification)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders the hint with the condition outcome, e.g. `'in stock' [ false ]`.
    pub fn render(&self, data: Option<&T>, outcome: Option<&Condition>) -> String {
        let status = outcome.map(ToString::to_string);
        let clarification = data.and_then(|d| self.clarification.as_ref().map(|c| c(d)));
        render_parts(&self.name, status, clarification)
    }
}

impl<T> Clone for ConditionHint<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            clarification: self.clarification.clone(),
        }
    }
}

impl<T> fmt::Display for ConditionHint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T> fmt::Debug for ConditionHint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionHint").field("name", &self.name).finish_non_exhaustive()
    }
}
