//! Trigger: what an automation rule is meant to react to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of signal a rule reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// `value` is a time of day, e.g. `"07:30"`.
    Time,
    /// `value` identifies a sensor and the reading to match.
    Sensor,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => f.write_str("time"),
            Self::Sensor => f.write_str("sensor"),
        }
    }
}

/// The stored trigger of an automation rule.
///
/// Triggers are recorded as given and never evaluated by the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    pub value: String,
}

impl Trigger {
    #[must_use]
    pub fn time(value: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Time,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn sensor(value: impl Into<String>) -> Self {
        Self {
            kind: TriggerKind::Sensor,
            value: value.into(),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_kind_under_type_key() {
        let json = serde_json::to_value(Trigger::time("07:30")).unwrap();
        assert_eq!(json, serde_json::json!({"type": "time", "value": "07:30"}));
    }

    #[test]
    fn should_reject_unknown_trigger_kind() {
        let result: Result<Trigger, _> =
            serde_json::from_str(r#"{"type": "weather", "value": "rain"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn should_display_kind_and_value() {
        assert_eq!(Trigger::sensor("motion-1:on").to_string(), "sensor(motion-1:on)");
    }
}
