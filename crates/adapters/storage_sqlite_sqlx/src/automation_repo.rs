//! `SQLite` implementation of [`AutomationRepository`].
//!
//! Trigger, condition and action are stored as JSON documents.

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use smarthome_app::ports::AutomationRepository;
use smarthome_domain::automation::{AutomationRule, Condition, RuleAction, Trigger};
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::AutomationId;

use crate::error::StorageError;

struct Wrapper(AutomationRule);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<AutomationRule> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let trigger_json: String = row.try_get("trigger_data")?;
        let condition_json: Option<String> = row.try_get("condition_data")?;
        let action_json: String = row.try_get("action_data")?;

        let id = AutomationId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let trigger: Trigger = serde_json::from_str(&trigger_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let condition: Option<Condition> = condition_json
            .map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let action: RuleAction = serde_json::from_str(&action_json)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(AutomationRule {
            id,
            name,
            trigger,
            condition,
            action,
        }))
    }
}

struct Encoded {
    trigger: String,
    condition: Option<String>,
    action: String,
}

impl Encoded {
    fn new(rule: &AutomationRule) -> Result<Self, StorageError> {
        Ok(Self {
            trigger: serde_json::to_string(&rule.trigger)?,
            condition: rule
                .condition
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            action: serde_json::to_string(&rule.action)?,
        })
    }
}

const INSERT: &str = "INSERT INTO automation_rules (id, name, trigger_data, condition_data, action_data) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM automation_rules WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM automation_rules ORDER BY rowid";
const UPDATE: &str = "UPDATE automation_rules SET name = ?, trigger_data = ?, condition_data = ?, action_data = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM automation_rules WHERE id = ?";

/// `SQLite`-backed automation rule repository.
pub struct SqliteAutomationRepository {
    pool: SqlitePool,
}

impl SqliteAutomationRepository {
    /// Create a new repository backed by the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AutomationRepository for SqliteAutomationRepository {
    async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, SmartHomeError> {
        let encoded = Encoded::new(&rule)?;

        sqlx::query(INSERT)
            .bind(rule.id.to_string())
            .bind(&rule.name)
            .bind(&encoded.trigger)
            .bind(&encoded.condition)
            .bind(&encoded.action)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn get_by_id(&self, id: AutomationId) -> Result<Option<AutomationRule>, SmartHomeError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<AutomationRule>, SmartHomeError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, SmartHomeError> {
        let encoded = Encoded::new(&rule)?;

        sqlx::query(UPDATE)
            .bind(&rule.name)
            .bind(&encoded.trigger)
            .bind(&encoded.condition)
            .bind(&encoded.action)
            .bind(rule.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rule)
    }

    async fn delete(&self, id: AutomationId) -> Result<bool, SmartHomeError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
