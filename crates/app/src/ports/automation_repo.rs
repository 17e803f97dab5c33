//! Automation repository port: persistence for automation rules.

use std::future::Future;

use smarthome_domain::automation::AutomationRule;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::AutomationId;

/// Repository for persisting and querying [`AutomationRule`]s.
pub trait AutomationRepository {
    /// Create a new rule in storage.
    fn create(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, SmartHomeError>> + Send;

    /// Get a rule by its unique identifier.
    fn get_by_id(
        &self,
        id: AutomationId,
    ) -> impl Future<Output = Result<Option<AutomationRule>, SmartHomeError>> + Send;

    /// Get all rules.
    fn get_all(&self) -> impl Future<Output = Result<Vec<AutomationRule>, SmartHomeError>> + Send;

    /// Replace an existing rule.
    fn update(
        &self,
        rule: AutomationRule,
    ) -> impl Future<Output = Result<AutomationRule, SmartHomeError>> + Send;

    /// Delete a rule, returning whether a record was removed.
    fn delete(&self, id: AutomationId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;
}
