//! Read-only view of the device type registry.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use smarthome_app::ports::{AutomationRepository, DeviceRepository};

use crate::state::AppState;

/// One registry entry as exposed to clients.
#[derive(Serialize)]
pub struct DeviceTypeView {
    #[serde(rename = "type")]
    pub device_type: String,
    pub actions: Vec<String>,
    pub default_command: Option<String>,
}

/// `GET /api/device-types`
pub async fn list<DR, AR>(State(state): State<AppState<DR, AR>>) -> Json<Vec<DeviceTypeView>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let types = state
        .device_service
        .registry()
        .iter()
        .map(|(name, config)| DeviceTypeView {
            device_type: name.to_string(),
            actions: config.allowed_actions().map(str::to_string).collect(),
            default_command: config.get_default_command().map(str::to_string),
        })
        .collect();
    Json(types)
}
