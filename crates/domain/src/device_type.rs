//! Device type registry: which actions and commands each device type accepts.
//!
//! Every allowed action carries an optional [`Effect`], so the attribute
//! mutation for a `(type, action)` pair is looked up in the same table that
//! decides whether the action is legal. Supporting a new device type means
//! registering another [`DeviceTypeConfig`], not touching the mutator.

use std::collections::BTreeMap;

use crate::device::Device;
use crate::error::ControlError;
use crate::status::Status;

/// Brightness applied by [`Effect::Dim`] when the request carries no value.
pub const DEFAULT_BRIGHTNESS: f64 = 50.0;

/// Temperature assumed when a device has never reported one.
pub const DEFAULT_TEMPERATURE: f64 = 20.0;

/// Temperature step used when the request carries no value.
pub const DEFAULT_TEMPERATURE_STEP: f64 = 1.0;

/// Attribute mutation bound to a `(device type, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Overwrite `status`.
    SetStatus(Status),
    /// `brightness := value` or [`DEFAULT_BRIGHTNESS`].
    Dim,
    /// `temperature := (temperature or 20) + (value or 1)`.
    RaiseTemperature,
    /// `temperature := (temperature or 20) - (value or 1)`.
    LowerTemperature,
    /// `fan := true`.
    EnableFan,
}

impl Effect {
    /// Apply this effect to `device` in place.
    pub fn apply(self, device: &mut Device, value: Option<f64>) {
        match self {
            Self::SetStatus(status) => device.status = Some(status),
            Self::Dim => device.brightness = Some(value.unwrap_or(DEFAULT_BRIGHTNESS)),
            Self::RaiseTemperature => {
                let current = device.temperature.unwrap_or(DEFAULT_TEMPERATURE);
                device.temperature = Some(current + value.unwrap_or(DEFAULT_TEMPERATURE_STEP));
            }
            Self::LowerTemperature => {
                let current = device.temperature.unwrap_or(DEFAULT_TEMPERATURE);
                device.temperature = Some(current - value.unwrap_or(DEFAULT_TEMPERATURE_STEP));
            }
            Self::EnableFan => device.fan = Some(true),
        }
    }
}

/// One action a device type accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSpec {
    pub name: String,
    pub effect: Option<Effect>,
}

/// Allowed actions and default command of one device type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceTypeConfig {
    actions: Vec<ActionSpec>,
    default_command: Option<String>,
}

impl DeviceTypeConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `name` without any attribute mutation of its own.
    #[must_use]
    pub fn action(self, name: impl Into<String>) -> Self {
        self.push(name.into(), None)
    }

    /// Allow `name` and bind it to `effect`.
    #[must_use]
    pub fn action_with(self, name: impl Into<String>, effect: Effect) -> Self {
        self.push(name.into(), Some(effect))
    }

    #[must_use]
    pub fn default_command(mut self, command: impl Into<String>) -> Self {
        self.default_command = Some(command.into());
        self
    }

    fn push(mut self, name: String, effect: Option<Effect>) -> Self {
        self.actions.retain(|spec| spec.name != name);
        self.actions.push(ActionSpec { name, effect });
        self
    }

    /// Allowed action names in registration order.
    pub fn allowed_actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|spec| spec.name.as_str())
    }

    #[must_use]
    pub fn allows(&self, action: &str) -> bool {
        self.find(action).is_some()
    }

    /// The effect bound to `action`, if the action is allowed and has one.
    #[must_use]
    pub fn effect_of(&self, action: &str) -> Option<Effect> {
        self.find(action).and_then(|spec| spec.effect)
    }

    #[must_use]
    pub fn get_default_command(&self) -> Option<&str> {
        self.default_command.as_deref()
    }

    fn find(&self, action: &str) -> Option<&ActionSpec> {
        self.actions.iter().find(|spec| spec.name == action)
    }
}

/// Immutable mapping from device type name to its [`DeviceTypeConfig`].
///
/// Built once at start-up and shared read-only between requests.
#[derive(Debug, Clone, Default)]
pub struct DeviceTypeRegistry {
    types: BTreeMap<String, DeviceTypeConfig>,
}

impl DeviceTypeRegistry {
    /// Start an empty registry.
    #[must_use]
    pub fn builder() -> DeviceTypeRegistryBuilder {
        DeviceTypeRegistryBuilder::default()
    }

    /// The device types shipped with the hub: light, ac, `moon_light`, refrigerator.
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder()
            .register(
                "light",
                DeviceTypeConfig::new()
                    .action("Turn On")
                    .action("Turn Off")
                    .action_with("Dim", Effect::Dim),
            )
            .register(
                "ac",
                DeviceTypeConfig::new()
                    .action_with("Turn On", Effect::SetStatus(Status::On))
                    .action_with("Turn Off", Effect::SetStatus(Status::Off))
                    .action_with("IncreaseTemp", Effect::RaiseTemperature)
                    .action_with("DecreaseTemp", Effect::LowerTemperature)
                    .action_with("Fan", Effect::EnableFan),
            )
            .register(
                "moon_light",
                DeviceTypeConfig::new()
                    .action("Turn On")
                    .action("Turn Off")
                    .default_command("moon_light"),
            )
            .register(
                "refrigerator",
                DeviceTypeConfig::new()
                    .action_with("Turn On", Effect::SetStatus(Status::On))
                    .action_with("Turn Off", Effect::SetStatus(Status::Off)),
            )
            .build()
    }

    /// Resolve the configuration of `device_type`.
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::UnsupportedDeviceType`] for unknown types.
    pub fn lookup(&self, device_type: &str) -> Result<&DeviceTypeConfig, ControlError> {
        self.types
            .get(device_type)
            .ok_or_else(|| ControlError::UnsupportedDeviceType(device_type.to_string()))
    }

    /// Registered types, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceTypeConfig)> {
        self.types.iter().map(|(name, config)| (name.as_str(), config))
    }
}

/// Collects device types before freezing them into a [`DeviceTypeRegistry`].
#[derive(Debug, Default)]
pub struct DeviceTypeRegistryBuilder {
    types: BTreeMap<String, DeviceTypeConfig>,
}

impl DeviceTypeRegistryBuilder {
    /// Add or replace the configuration of `name`.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, config: DeviceTypeConfig) -> Self {
        self.types.insert(name.into(), config);
        self
    }

    #[must_use]
    pub fn build(self) -> DeviceTypeRegistry {
        DeviceTypeRegistry { types: self.types }
    }
}
