//! Device: a controllable appliance registered with the hub.

use serde::{Deserialize, Serialize};

use crate::error::{SmartHomeError, ValidationError};
use crate::id::DeviceId;
use crate::status::Status;
use crate::time::{Timestamp, now};

/// A registered device and its last known attributes.
///
/// `device_type` names an entry of the
/// [`DeviceTypeRegistry`](crate::device_type::DeviceTypeRegistry) but is not
/// checked against it here: a device of an unregistered type can be stored,
/// it just cannot be controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub status: Option<Status>,
    pub brightness: Option<f64>,
    pub temperature: Option<f64>,
    pub fan: Option<bool>,
    pub created_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `device_type` is empty ([`ValidationError::EmptyDeviceType`])
    pub fn validate(&self) -> Result<(), SmartHomeError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.device_type.trim().is_empty() {
            return Err(ValidationError::EmptyDeviceType.into());
        }
        Ok(())
    }

    /// Overwrite registration fields present in `patch`, then re-check invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] when the patched device is invalid.
    pub fn apply_patch(&mut self, patch: DevicePatch) -> Result<(), SmartHomeError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(device_type) = patch.device_type {
            self.device_type = device_type;
        }
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        self.validate()
    }

    /// Merge a raw attribute patch into this device.
    ///
    /// Only fields present in `patch` are overwritten.
    pub fn merge_state(&mut self, patch: StatePatch) {
        if let Some(status) = patch.status {
            self.status = Some(status);
        }
        if let Some(brightness) = patch.brightness {
            self.brightness = Some(brightness);
        }
        if let Some(temperature) = patch.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(fan) = patch.fan {
            self.fan = Some(fan);
        }
    }
}

/// Partial update of a device's registration fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub status: Option<Status>,
}

/// Direct attribute overrides, bypassing the control validator.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatePatch {
    pub status: Option<Status>,
    pub brightness: Option<f64>,
    pub temperature: Option<f64>,
    pub fan: Option<bool>,
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    device_type: Option<String>,
    status: Option<Status>,
    brightness: Option<f64>,
    temperature: Option<f64>,
    fan: Option<bool>,
    created_at: Option<Timestamp>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn brightness(mut self, brightness: f64) -> Self {
        self.brightness = Some(brightness);
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn fan(mut self, fan: bool) -> Self {
        self.fan = Some(fan);
        self
    }

    #[must_use]
    pub fn created_at(mut self, ts: Timestamp) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if `name` or `device_type` is
    /// missing or empty.
    pub fn build(self) -> Result<Device, SmartHomeError> {
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            device_type: self.device_type.unwrap_or_default(),
            status: self.status,
            brightness: self.brightness,
            temperature: self.temperature,
            fan: self.fan,
            created_at: self.created_at.unwrap_or_else(now),
        };
        device.validate()?;
        Ok(device)
    }
}
