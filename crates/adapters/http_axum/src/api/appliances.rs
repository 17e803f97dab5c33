//! Stateless appliance control: cameras, TVs and smart doors.
//!
//! Each endpoint checks the command and answers with an acknowledgement;
//! nothing is persisted.

use axum::Json;
use serde::Serialize;

use smarthome_domain::appliance::{
    CameraCommand, CameraRequest, DoorCommand, DoorRequest, TvCommand, TvRequest,
};

use crate::error::ApiError;

/// Acknowledgement body.
#[derive(Serialize)]
pub struct Acknowledgement {
    pub message: String,
}

/// `POST /api/cameras/control`
pub async fn camera(Json(req): Json<CameraRequest>) -> Result<Json<Acknowledgement>, ApiError> {
    let command = CameraCommand::try_from(req)?;
    tracing::info!(?command, "camera command");
    Ok(Json(Acknowledgement {
        message: command.acknowledge(),
    }))
}

/// `POST /api/tvs/control`
pub async fn tv(Json(req): Json<TvRequest>) -> Result<Json<Acknowledgement>, ApiError> {
    let command = TvCommand::try_from(req)?;
    tracing::info!(?command, "tv command");
    Ok(Json(Acknowledgement {
        message: command.acknowledge(),
    }))
}

/// `POST /api/doors/control`
pub async fn door(Json(req): Json<DoorRequest>) -> Result<Json<Acknowledgement>, ApiError> {
    let command = DoorCommand::try_from(req)?;
    tracing::info!(?command, "door command");
    Ok(Json(Acknowledgement {
        message: command.acknowledge(),
    }))
}
