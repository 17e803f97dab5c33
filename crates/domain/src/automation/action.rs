//! Rule action: what an automation rule would do when it fires.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Action recorded on an automation rule, e.g. `{type: "device", value: "light:on"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl RuleAction {
    #[must_use]
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Both parts must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] naming the empty part.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kind.trim().is_empty() {
            return Err(ValidationError::EmptyField("action.type"));
        }
        if self.value.trim().is_empty() {
            return Err(ValidationError::EmptyField("action.value"));
        }
        Ok(())
    }
}
