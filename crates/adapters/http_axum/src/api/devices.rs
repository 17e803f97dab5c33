//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use smarthome_app::ports::{AutomationRepository, DeviceRepository};
use smarthome_domain::control::ControlRequest;
use smarthome_domain::device::{Device, DevicePatch, StatePatch};
use smarthome_domain::error::ValidationError;
use smarthome_domain::id::DeviceId;
use smarthome_domain::status::{Status, UnknownStatus};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for registering a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub device_type: String,
    pub status: Option<String>,
}

/// Request body for a partial device update.
#[derive(Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub status: Option<String>,
}

/// Request body for a direct attribute update.
#[derive(Deserialize)]
pub struct SetStateRequest {
    pub status: Option<String>,
    pub brightness: Option<f64>,
    pub temperature: Option<f64>,
    pub fan: Option<bool>,
}

/// Device returned alongside a confirmation message.
#[derive(Serialize)]
pub struct DeviceMessage {
    pub message: &'static str,
    pub device: Device,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from endpoints returning a single device.
pub enum DeviceResponse {
    Ok(Json<Device>),
    Created(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the on/off/state endpoints.
pub enum MessageResponse {
    Ok(Json<DeviceMessage>),
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
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

fn parse_status(raw: Option<String>) -> Result<Option<Status>, ValidationError> {
    raw.map(|s| s.parse::<Status>())
        .transpose()
        .map_err(|UnknownStatus(s)| ValidationError::UnknownStatus(s))
}

/// `GET /api/devices`
pub async fn list<DR, AR>(State(state): State<AppState<DR, AR>>) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/:id`
pub async fn get<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let device = state.device_service.get_device(DeviceId::parse(&id)?).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let mut builder = Device::builder().name(req.name).device_type(req.device_type);
    if let Some(status) = parse_status(req.status)? {
        builder = builder.status(status);
    }

    let device = builder.build()?;
    let created = state.device_service.create_device(device).await?;
    Ok(DeviceResponse::Created(Json(created)))
}

/// `PUT /api/devices/:id`
pub async fn update<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let id = DeviceId::parse(&id)?;
    let patch = DevicePatch {
        name: req.name,
        device_type: req.device_type,
        status: parse_status(req.status)?,
    };
    let device = state.device_service.update_device(id, patch).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/:id`
pub async fn delete<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    state.device_service.delete_device(DeviceId::parse(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}

/// `POST /api/devices/:id/on`
pub async fn turn_on<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<MessageResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let device = state.device_service.turn_on(DeviceId::parse(&id)?).await?;
    Ok(MessageResponse::Ok(Json(DeviceMessage {
        message: "Device turned on",
        device,
    })))
}

/// `POST /api/devices/:id/off`
pub async fn turn_off<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
) -> Result<MessageResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let device = state.device_service.turn_off(DeviceId::parse(&id)?).await?;
    Ok(MessageResponse::Ok(Json(DeviceMessage {
        message: "Device turned off",
        device,
    })))
}

/// `POST /api/devices/:id/state`
pub async fn set_state<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
    Json(req): Json<SetStateRequest>,
) -> Result<MessageResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let id = DeviceId::parse(&id)?;
    let patch = StatePatch {
        status: parse_status(req.status)?,
        brightness: req.brightness,
        temperature: req.temperature,
        fan: req.fan,
    };
    let device = state.device_service.set_state(id, patch).await?;
    Ok(MessageResponse::Ok(Json(DeviceMessage {
        message: "Device state updated",
        device,
    })))
}

/// `POST /api/devices/:id/control`
pub async fn control<DR, AR>(
    State(state): State<AppState<DR, AR>>,
    Path(id): Path<String>,
    Json(req): Json<ControlRequest>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let id = DeviceId::parse(&id)?;
    let device = state.device_service.control_device(id, req).await?;
    Ok(DeviceResponse::Ok(Json(device)))
}
