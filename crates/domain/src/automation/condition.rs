//! Condition: an optional guard stored alongside a rule.

use serde::{Deserialize, Serialize};

/// Free-form condition recorded with an automation rule.
///
/// Both parts are optional; the hub stores them verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Condition {
    /// Whether neither part is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.value.is_none()
    }
}
