//! JSON REST handlers for automation rules.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use smarthome_app::ports::{AutomationRepository, DeviceRepository};
use smarthome_domain::automation::{AutomationRule, Condition, RuleAction, RulePatch, Trigger};
use smarthome_domain::id::AutomationId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an automation rule.
#[derive(Deserialize)]
pub struct CreateRuleRequest {
    #[serde(default)]
    pub name: String,
    pub trigger: Option<Trigger>,
    pub condition: Option<Condition>,
    pub action: Option<RuleAction>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<AutomationRule>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single rule.
pub enum RuleResponse {
    Ok(Json<AutomationRule>),
    Created(Json<AutomationRule>),
}

impl IntoResponse for RuleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/automation-rules`
pub async fn list<DR, AR>(State(state): State<AppState<DR, AR>>) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let rules = state.automation_service.list_rules().await?;
    Ok(ListResponse::Ok(Json(rules)))
}

/// `GET /api/automation-rules/:id`
pub async fn get<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<RuleResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let rule = state
        .automation_service
        .get_rule(AutomationId::parse(&id)?)
        .await?;
    Ok(RuleResponse::Ok(Json(rule)))
}

/// `POST /api/automation-rules`
pub async fn create<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<RuleResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let mut builder = AutomationRule::builder().name(req.name);
    if let Some(trigger) = req.trigger {
        builder = builder.trigger(trigger);
    }
    if let Some(condition) = req.condition {
        builder = builder.condition(condition);
    }
    if let Some(action) = req.action {
        builder = builder.action(action);
    }

    let rule = builder.build()?;
    let created = state.automation_service.create_rule(rule).await?;
    Ok(RuleResponse::Created(Json(created)))
}

/// `PUT /api/automation-rules/:id`
pub async fn update<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
    Json(patch): Json<RulePatch>,
) -> Result<RuleResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let id = AutomationId::parse(&id)?;
    let rule = state.automation_service.update_rule(id, patch).await?;
    Ok(RuleResponse::Ok(Json(rule)))
}

/// `DELETE /api/automation-rules/:id`
pub async fn delete<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    state
        .automation_service
        .delete_rule(AutomationId::parse(&id)?)
        .await?;
    Ok(DeleteResponse::NoContent)
}
