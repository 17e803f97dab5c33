//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHomeError`] via `#[from]`.

use thiserror::Error;

/// Top-level error shared by the domain, application, and adapter layers.
#[derive(Debug, Error)]
pub enum SmartHomeError {
    /// A value failed a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A device control request was rejected before any mutation.
    #[error("control error: {0}")]
    Control(#[from] ControlError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The storage backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("device type must not be empty")]
    EmptyDeviceType,

    #[error("invalid id")]
    InvalidId,

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("unknown status {0:?}")]
    UnknownStatus(String),

    #[error("unsupported {kind} action {action:?}")]
    UnknownApplianceAction { kind: &'static str, action: String },

    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Rejections produced by the device control validator.
///
/// None of these are retryable: they describe a request the client must change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("unsupported device type {0:?}")]
    UnsupportedDeviceType(String),

    #[error("action {action:?} is not allowed for device type {device_type:?}")]
    InvalidAction { device_type: String, action: String },

    #[error("command {command:?} is not allowed for device type {device_type:?}")]
    InvalidCommand {
        device_type: String,
        command: String,
    },

    #[error("unknown status {0:?}")]
    InvalidStatus(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
