//! Device control: validating a control request and applying it to a device.
//!
//! [`validate`] is the only way to obtain a [`ValidatedControl`] and
//! [`apply`] only accepts that type, so a rejected request never reaches the
//! mutator.

use serde::Deserialize;

use crate::device::Device;
use crate::device_type::{DeviceTypeRegistry, Effect};
use crate::error::ControlError;
use crate::status::Status;

/// An inbound control request as sent by a client.
///
/// Any combination of `status`, `action` and `command` may be present,
/// including none of them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ControlRequest {
    /// Device type to validate against; defaults to the stored device's type.
    #[serde(rename = "type")]
    pub device_type: Option<String>,
    pub status: Option<String>,
    pub action: Option<String>,
    pub command: Option<String>,
    pub value: Option<f64>,
}

impl ControlRequest {
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// A control request that passed [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedControl {
    status: Option<Status>,
    effect: Option<Effect>,
    value: Option<f64>,
}

impl ValidatedControl {
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.status
    }

    #[must_use]
    pub fn effect(&self) -> Option<Effect> {
        self.effect
    }
}

/// Check `request` against the registry entry for `device_type`.
///
/// Rules run in order: type lookup, action membership, command match,
/// status vocabulary. The first failure is returned.
///
/// # Errors
///
/// - [`ControlError::UnsupportedDeviceType`] when `device_type` is not registered
/// - [`ControlError::InvalidAction`] when the action is not allowed for the type
/// - [`ControlError::InvalidCommand`] when the command differs from the type's
///   default command, or is non-empty for a type without one
/// - [`ControlError::InvalidStatus`] when the status is outside the vocabulary
pub fn validate(
    registry: &DeviceTypeRegistry,
    device_type: &str,
    request: &ControlRequest,
) -> Result<ValidatedControl, ControlError> {
    let config = registry.lookup(device_type)?;

    let effect = match request.action.as_deref() {
        Some(action) if !config.allows(action) => {
            return Err(ControlError::InvalidAction {
                device_type: device_type.to_string(),
                action: action.to_string(),
            });
        }
        Some(action) => config.effect_of(action),
        None => None,
    };

    if let Some(command) = request.command.as_deref() {
        let accepted = match config.get_default_command() {
            Some(default) => command == default,
            None => command.is_empty(),
        };
        if !accepted {
            return Err(ControlError::InvalidCommand {
                device_type: device_type.to_string(),
                command: command.to_string(),
            });
        }
    }

    let status = request
        .status
        .as_deref()
        .map(str::parse::<Status>)
        .transpose()
        .map_err(|err| ControlError::InvalidStatus(err.0))?;

    Ok(ValidatedControl {
        status,
        effect,
        value: request.value,
    })
}

/// Compute the device state that results from a validated control request.
///
/// The generic status assignment runs first, then the action's effect (which
/// may overwrite it). Actions without an effect, and commands, leave the
/// device otherwise untouched.
#[must_use]
pub fn apply(mut device: Device, control: &ValidatedControl) -> Device {
    if let Some(status) = control.status {
        device.status = Some(status);
    }
    if let Some(effect) = control.effect {
        effect.apply(&mut device, control.value);
    }
    device
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> DeviceTypeRegistry {
        DeviceTypeRegistry::builtin()
    }

    fn device(device_type: &str) -> Device {
        Device::builder()
            .name("test device")
            .device_type(device_type)
            .build()
            .unwrap()
    }

    fn control(device: Device, request: &ControlRequest) -> Result<Device, ControlError> {
        let registry = registry();
        let validated = validate(&registry, &device.device_type, request)?;
        Ok(apply(device, &validated))
    }

    #[test]
    fn should_accept_every_allowed_action_for_every_type() {
        let registry = registry();
        for (device_type, config) in registry.iter() {
            for action in config.allowed_actions() {
                let request = ControlRequest::default().with_action(action);
                assert!(
                    validate(&registry, device_type, &request).is_ok(),
                    "{device_type}/{action}"
                );
            }
        }
    }

    #[test]
    fn should_reject_actions_of_other_types() {
        let registry = registry();
        let request = ControlRequest::default().with_action("Dim");
        for device_type in ["ac", "moon_light", "refrigerator"] {
            assert!(matches!(
                validate(&registry, device_type, &request),
                Err(ControlError::InvalidAction { .. })
            ));
        }
    }

    #[test]
    fn should_reject_unknown_action_for_light() {
        let request = ControlRequest::default().with_action("Explode");
        assert_eq!(
            validate(&registry(), "light", &request),
            Err(ControlError::InvalidAction {
                device_type: "light".to_string(),
                action: "Explode".to_string(),
            })
        );
    }

    #[test]
    fn should_reject_unregistered_type_before_looking_at_action() {
        let request = ControlRequest::default().with_action("Heat");
        assert_eq!(
            validate(&registry(), "thermostat", &request),
            Err(ControlError::UnsupportedDeviceType("thermostat".to_string()))
        );
    }

    #[test]
    fn should_accept_default_command_for_moon_light() {
        let request = ControlRequest::default().with_command("moon_light");
        assert!(validate(&registry(), "moon_light", &request).is_ok());
    }

    #[test]
    fn should_reject_other_commands_for_moon_light() {
        let registry = registry();
        for command in ["increase_temperature", "MOON_LIGHT", ""] {
            let request = ControlRequest::default().with_command(command);
            assert!(
                matches!(
                    validate(&registry, "moon_light", &request),
                    Err(ControlError::InvalidCommand { .. })
                ),
                "{command:?}"
            );
        }
    }

    #[test]
    fn should_reject_any_non_empty_command_without_default() {
        let registry = registry();
        for device_type in ["light", "ac", "refrigerator"] {
            for command in ["moon_light", "increase_temperature"] {
                let request = ControlRequest::default().with_command(command);
                assert!(matches!(
                    validate(&registry, device_type, &request),
                    Err(ControlError::InvalidCommand { .. })
                ));
            }
        }
    }

    #[test]
    fn should_ignore_empty_command_without_default() {
        let request = ControlRequest::default().with_command("");
        assert!(validate(&registry(), "refrigerator", &request).is_ok());
    }

    #[test]
    fn should_reject_status_outside_vocabulary() {
        let registry = registry();
        for status in ["Dim", "Increasing Temperature", "ON", ""] {
            let request = ControlRequest::default().with_status(status);
            assert_eq!(
                validate(&registry, "light", &request),
                Err(ControlError::InvalidStatus(status.to_string()))
            );
        }
    }

    #[test]
    fn should_accept_every_status_in_vocabulary() {
        let registry = registry();
        for status in Status::ALL {
            let request = ControlRequest::default().with_status(status.as_str());
            let validated = validate(&registry, "ac", &request).unwrap();
            assert_eq!(validated.status(), Some(status));
        }
    }

    #[test]
    fn should_check_action_before_command() {
        let request = ControlRequest::default()
            .with_action("Explode")
            .with_command("nope");
        assert!(matches!(
            validate(&registry(), "light", &request),
            Err(ControlError::InvalidAction { .. })
        ));
    }

    #[test]
    fn should_accept_request_with_nothing_set() {
        let validated = validate(&registry(), "light", &ControlRequest::default()).unwrap();
        assert_eq!(validated.status(), None);
        assert_eq!(validated.effect(), None);
    }

    #[test]
    fn should_increase_temperature_by_one_by_default() {
        let mut ac = device("ac");
        ac.temperature = Some(20.0);
        let result = control(ac, &ControlRequest::default().with_action("IncreaseTemp")).unwrap();
        assert_eq!(result.temperature, Some(21.0));
    }

    #[test]
    fn should_increase_temperature_by_requested_value() {
        let mut ac = device("ac");
        ac.temperature = Some(20.0);
        let request = ControlRequest::default()
            .with_action("IncreaseTemp")
            .with_value(5.0);
        assert_eq!(control(ac, &request).unwrap().temperature, Some(25.0));
    }

    #[test]
    fn should_decrease_from_default_temperature_when_unset() {
        let request = ControlRequest::default().with_action("DecreaseTemp");
        assert_eq!(control(device("ac"), &request).unwrap().temperature, Some(19.0));
    }

    #[test]
    fn should_dim_light_to_fifty_by_default() {
        let request = ControlRequest::default().with_action("Dim");
        assert_eq!(control(device("light"), &request).unwrap().brightness, Some(50.0));
    }

    #[test]
    fn should_dim_light_to_requested_value() {
        let request = ControlRequest::default().with_action("Dim").with_value(75.0);
        assert_eq!(control(device("light"), &request).unwrap().brightness, Some(75.0));
    }

    #[test]
    fn should_turn_refrigerator_on() {
        let request = ControlRequest::default().with_action("Turn On");
        assert_eq!(
            control(device("refrigerator"), &request).unwrap().status,
            Some(Status::On)
        );
    }

    #[test]
    fn should_let_ac_action_overwrite_requested_status() {
        let request = ControlRequest::default()
            .with_status("on")
            .with_action("Turn Off");
        assert_eq!(control(device("ac"), &request).unwrap().status, Some(Status::Off));
    }

    #[test]
    fn should_enable_ac_fan() {
        let request = ControlRequest::default().with_action("Fan");
        assert_eq!(control(device("ac"), &request).unwrap().fan, Some(true));
    }

    #[test]
    fn should_leave_light_untouched_on_turn_on() {
        let before = device("light");
        let request = ControlRequest::default().with_action("Turn On");
        let after = control(before.clone(), &request).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn should_only_apply_status_for_moon_light_command() {
        let before = device("moon_light");
        let request = ControlRequest::default()
            .with_command("moon_light")
            .with_status("on");
        let after = control(before.clone(), &request).unwrap();
        assert_eq!(after.status, Some(Status::On));
        assert_eq!(after.brightness, before.brightness);
        assert_eq!(after.temperature, before.temperature);
        assert_eq!(after.fan, before.fan);
    }

    #[test]
    fn should_be_idempotent_for_status_only_requests() {
        let registry = registry();
        let request = ControlRequest::default().with_status("locked");
        let validated = validate(&registry, "light", &request).unwrap();
        let once = apply(device("light"), &validated);
        let twice = apply(once.clone(), &validated);
        assert_eq!(once.status, twice.status);
        assert_eq!(once, twice);
    }

    #[test]
    fn should_deserialize_type_field_from_json() {
        let request: ControlRequest =
            serde_json::from_str(r#"{"type":"ac","action":"IncreaseTemp","value":2}"#).unwrap();
        assert_eq!(request.device_type.as_deref(), Some("ac"));
        assert_eq!(request.value, Some(2.0));
    }
}
