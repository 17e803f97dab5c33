//! Automation rules: trigger → condition → action records.
//!
//! Rules are persisted and served back to clients. The hub does not evaluate
//! them: nothing watches time or sensors to fire a rule's action.

mod action;
mod condition;
mod trigger;

pub use action::RuleAction;
pub use condition::Condition;
pub use trigger::{Trigger, TriggerKind};

use serde::{Deserialize, Serialize};

use crate::error::{SmartHomeError, ValidationError};
use crate::id::AutomationId;

/// A stored automation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: AutomationId,
    pub name: String,
    pub trigger: Trigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    pub action: RuleAction,
}

impl AutomationRule {
    /// Create a builder for constructing an [`AutomationRule`].
    #[must_use]
    pub fn builder() -> AutomationRuleBuilder {
        AutomationRuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - the trigger value is empty ([`ValidationError::EmptyField`])
    /// - either part of the action is empty ([`ValidationError::EmptyField`])
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.trigger.value.trim().is_empty() {
            return Err(ValidationError::EmptyField("trigger.value").into());
        }
        self.action.validate()?;
        Ok(())
    }

    /// Overwrite the fields present in `patch`, then re-check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when the patched rule is invalid.
    pub fn apply_patch(&mut self, patch: RulePatch) -> Result<(), SmartHomeError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(trigger) = patch.trigger {
            if let Some(kind) = trigger.kind {
                self.trigger.kind = kind;
            }
            if let Some(value) = trigger.value {
                self.trigger.value = value;
            }
        }
        if let Some(condition) = patch.condition {
            self.condition = (!condition.is_empty()).then_some(condition);
        }
        if let Some(action) = patch.action {
            if let Some(kind) = action.kind {
                self.action.kind = kind;
            }
            if let Some(value) = action.value {
                self.action.value = value;
            }
        }
        self.validate()
    }
}

/// Partial update of an [`AutomationRule`].
///
/// An empty `condition` object clears the stored condition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RulePatch {
    pub name: Option<String>,
    pub trigger: Option<TriggerPatch>,
    pub condition: Option<Condition>,
    pub action: Option<ActionPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TriggerPatch {
    #[serde(rename = "type")]
    pub kind: Option<TriggerKind>,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionPatch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
}

/// Step-by-step builder for [`AutomationRule`].
#[derive(Debug, Default)]
pub struct AutomationRuleBuilder {
    id: Option<AutomationId>,
    name: Option<String>,
    trigger: Option<Trigger>,
    condition: Option<Condition>,
    action: Option<RuleAction>,
}

impl AutomationRuleBuilder {
    #[must_use]
    pub fn id(mut self, id: AutomationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    #[must_use]
    pub fn action(mut self, action: RuleAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Consume the builder, validate, and return an [`AutomationRule`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if the trigger or action is
    /// missing, or any invariant of [`AutomationRule::validate`] fails.
    pub fn build(self) -> Result<AutomationRule, SmartHomeError> {
        let trigger = self
            .trigger
            .ok_or(ValidationError::MissingField { field: "trigger" })?;
        let action = self
            .action
            .ok_or(ValidationError::MissingField { field: "action" })?;
        let rule = AutomationRule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            trigger,
            condition: self.condition.filter(|c| !c.is_empty()),
            action,
        };
        rule.validate()?;
        Ok(rule)
    }
}
