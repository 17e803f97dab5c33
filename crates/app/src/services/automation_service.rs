//! Automation service: use-cases for managing automation rules.

use smarthome_domain::automation::{AutomationRule, RulePatch};
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::AutomationId;

use crate::ports::AutomationRepository;

/// Application service for automation rule CRUD operations.
pub struct AutomationService<R> {
    repo: R,
}

impl<R: AutomationRepository> AutomationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new rule after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, rule), fields(rule_name = %rule.name, trigger = %rule.trigger))]
    pub async fn create_rule(&self, rule: AutomationRule) -> Result<AutomationRule, SmartHomeError> {
        rule.validate()?;
        self.repo.create(rule).await
    }

    /// Look up a rule by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no rule with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_rule(&self, id: AutomationId) -> Result<AutomationRule, SmartHomeError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// List all rules.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_rules(&self) -> Result<Vec<AutomationRule>, SmartHomeError> {
        self.repo.get_all().await
    }

    /// Apply a partial update to an existing rule.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the rule does not exist,
    /// [`SmartHomeError::Validation`] if the patched rule is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_rule(
        &self,
        id: AutomationId,
        patch: RulePatch,
    ) -> Result<AutomationRule, SmartHomeError> {
        let mut rule = self.get_rule(id).await?;
        rule.apply_patch(patch)?;
        self.repo.update(rule).await
    }

    /// Delete a rule by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if nothing was deleted, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_rule(&self, id: AutomationId) -> Result<(), SmartHomeError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id).into())
        }
    }
}

fn not_found(id: AutomationId) -> NotFoundError {
    NotFoundError {
        entity: "Automation rule",
        id: id.to_string(),
    }
}
