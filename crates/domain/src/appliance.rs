//! Appliance commands: cameras, TVs and smart doors.
//!
//! These appliances are not registered devices: a command is checked,
//! acknowledged with a human-readable message, and nothing is stored.

use std::fmt;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::status::Status;

/// Raw camera control body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CameraRequest {
    pub action: Option<String>,
    pub duration: Option<f64>,
    pub status: Option<String>,
}

/// A checked camera command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraCommand {
    On,
    Off,
    Record { duration: Option<f64> },
    Snapshot,
}

impl TryFrom<CameraRequest> for CameraCommand {
    type Error = ValidationError;

    fn try_from(req: CameraRequest) -> Result<Self, Self::Error> {
        if let Some(status) = req.status.as_deref() {
            expect_status(status, &[Status::On, Status::Off])?;
        }
        match required_action(req.action.as_deref())? {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "record" => Ok(Self::Record {
                duration: req.duration,
            }),
            "snapshot" => Ok(Self::Snapshot),
            other => Err(unknown("camera", other)),
        }
    }
}

impl CameraCommand {
    #[must_use]
    pub fn acknowledge(&self) -> String {
        match self {
            Self::On => "Camera turned on".to_string(),
            Self::Off => "Camera turned off".to_string(),
            Self::Record {
                duration: Some(seconds),
            } => format!("Camera started recording for {seconds} seconds"),
            Self::Record { duration: None } => {
                "Camera started recording for indefinite seconds".to_string()
            }
            Self::Snapshot => "Snapshot taken".to_string(),
        }
    }
}

/// A TV channel given either as a number or a name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Channel {
    Number(serde_json::Number),
    Name(String),
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Raw TV control body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TvRequest {
    pub action: Option<String>,
    pub status: Option<String>,
    pub volume: Option<f64>,
    pub channel: Option<Channel>,
}

/// A checked TV command.
#[derive(Debug, Clone, PartialEq)]
pub enum TvCommand {
    On,
    Off,
    VolumeUp { volume: Option<f64> },
    VolumeDown { volume: Option<f64> },
    ChangeChannel { channel: Option<Channel> },
}

impl TryFrom<TvRequest> for TvCommand {
    type Error = ValidationError;

    fn try_from(req: TvRequest) -> Result<Self, Self::Error> {
        match required_action(req.action.as_deref())? {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            "volume_up" => Ok(Self::VolumeUp { volume: req.volume }),
            "volume_down" => Ok(Self::VolumeDown { volume: req.volume }),
            "change_channel" => Ok(Self::ChangeChannel {
                channel: req.channel,
            }),
            other => Err(unknown("tv", other)),
        }
    }
}

impl TvCommand {
    #[must_use]
    pub fn acknowledge(&self) -> String {
        match self {
            Self::On => "TV turned on".to_string(),
            Self::Off => "TV turned off".to_string(),
            Self::VolumeUp { volume: Some(v) } => format!("TV volume increased to {v}"),
            Self::VolumeUp { volume: None } => "TV volume increased".to_string(),
            Self::VolumeDown { volume: Some(v) } => format!("TV volume decreased to {v}"),
            Self::VolumeDown { volume: None } => "TV volume decreased".to_string(),
            Self::ChangeChannel { channel: Some(c) } => format!("TV channel changed to {c}"),
            Self::ChangeChannel { channel: None } => "TV channel changed".to_string(),
        }
    }
}

/// Raw smart door control body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoorRequest {
    pub action: Option<String>,
    pub status: Option<String>,
}

/// A checked smart door command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCommand {
    Lock,
    Unlock,
}

impl TryFrom<DoorRequest> for DoorCommand {
    type Error = ValidationError;

    fn try_from(req: DoorRequest) -> Result<Self, Self::Error> {
        let status = req
            .status
            .as_deref()
            .ok_or(ValidationError::MissingField { field: "status" })?;
        expect_status(status, &[Status::Locked, Status::Unlocked, Status::Busy])?;
        match required_action(req.action.as_deref())? {
            "lock" => Ok(Self::Lock),
            "unlock" => Ok(Self::Unlock),
            other => Err(unknown("door", other)),
        }
    }
}

impl DoorCommand {
    #[must_use]
    pub fn acknowledge(self) -> String {
        match self {
            Self::Lock => "Door locked".to_string(),
            Self::Unlock => "Door unlocked".to_string(),
        }
    }
}

fn required_action(action: Option<&str>) -> Result<&str, ValidationError> {
    action.ok_or(ValidationError::MissingField { field: "action" })
}

fn expect_status(raw: &str, allowed: &[Status]) -> Result<Status, ValidationError> {
    raw.parse::<Status>()
        .ok()
        .filter(|status| allowed.contains(status))
        .ok_or_else(|| ValidationError::UnknownStatus(raw.to_string()))
}

fn unknown(kind: &'static str, action: &str) -> ValidationError {
    ValidationError::UnknownApplianceAction {
        kind,
        action: action.to_string(),
    }
}
