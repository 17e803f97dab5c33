//! Status: the coarse state label stored on a device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Recognised device status labels.
///
/// The vocabulary is global: which labels make sense for a given device type
/// is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    On,
    Off,
    Locked,
    Unlocked,
    Busy,
    Recording,
    Snapshot,
}

impl Status {
    /// Every recognised status, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::On,
        Self::Off,
        Self::Locked,
        Self::Unlocked,
        Self::Busy,
        Self::Recording,
        Self::Snapshot,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::Locked => "locked",
            Self::Unlocked => "unlocked",
            Self::Busy => "busy",
            Self::Recording => "recording",
            Self::Snapshot => "snapshot",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is outside the status vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_label_it_displays() {
        for status in Status::ALL {
            assert_eq!(status.to_string().parse::<Status>(), Ok(status));
        }
    }

    #[test]
    fn should_reject_labels_outside_vocabulary() {
        assert_eq!(
            "Increasing Temperature".parse::<Status>(),
            Err(UnknownStatus("Increasing Temperature".to_string()))
        );
    }

    #[test]
    fn should_be_case_sensitive() {
        assert!("On".parse::<Status>().is_err());
    }

    #[test]
    fn should_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Unlocked).unwrap(), "\"unlocked\"");
    }
}
