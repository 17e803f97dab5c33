//! Device service: use-cases for registering and controlling devices.

use std::sync::Arc;

use smarthome_domain::control::{self, ControlRequest};
use smarthome_domain::device::{Device, DevicePatch, StatePatch};
use smarthome_domain::device_type::DeviceTypeRegistry;
use smarthome_domain::error::{NotFoundError, SmartHomeError};
use smarthome_domain::id::DeviceId;
use smarthome_domain::status::Status;

use crate::ports::DeviceRepository;

/// Application service for device CRUD and control.
pub struct DeviceService<R> {
    repo: R,
    registry: Arc<DeviceTypeRegistry>,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository and device type registry.
    pub fn new(repo: R, registry: Arc<DeviceTypeRegistry>) -> Self {
        Self { repo, registry }
    }

    /// The device types this service can control.
    #[must_use]
    pub fn registry(&self) -> &DeviceTypeRegistry {
        &self.registry
    }

    /// Register a new device after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name, device_type = %device.device_type))]
    pub async fn create_device(&self, device: Device) -> Result<Device, SmartHomeError> {
        device.validate()?;
        self.repo.create(device).await
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id).into())
    }

    /// List all devices.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self) -> Result<Vec<Device>, SmartHomeError> {
        self.repo.get_all().await
    }

    /// Update the registration fields of an existing device.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the device does not exist,
    /// [`SmartHomeError::Validation`] if the patched device is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        device.apply_patch(patch)?;
        self.repo.update(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if nothing was deleted, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), SmartHomeError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(not_found(id).into())
        }
    }

    /// Set the status of a device to [`Status::On`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the device does not exist, or
    /// a storage error from the repository.
    pub async fn turn_on(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        self.set_status(id, Status::On).await
    }

    /// Set the status of a device to [`Status::Off`].
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the device does not exist, or
    /// a storage error from the repository.
    pub async fn turn_off(&self, id: DeviceId) -> Result<Device, SmartHomeError> {
        self.set_status(id, Status::Off).await
    }

    #[tracing::instrument(skip(self))]
    async fn set_status(&self, id: DeviceId, status: Status) -> Result<Device, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        device.status = Some(status);
        self.repo.update(device).await
    }

    /// Overwrite device attributes directly, without the control validator.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the device does not exist, or
    /// a storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn set_state(&self, id: DeviceId, patch: StatePatch) -> Result<Device, SmartHomeError> {
        let mut device = self.get_device(id).await?;
        device.merge_state(patch);
        self.repo.update(device).await
    }

    /// Validate a control request against the device type registry, apply it,
    /// and persist the result.
    ///
    /// The request's `type` is used for validation when present, otherwise the
    /// stored device's type. Nothing is written when validation fails.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::NotFound`] if the device does not exist,
    /// [`SmartHomeError::Control`] if the request is rejected, or a storage
    /// error from the repository.
    #[tracing::instrument(
        skip(self, request),
        fields(action = ?request.action, command = ?request.command, status = ?request.status)
    )]
    pub async fn control_device(
        &self,
        id: DeviceId,
        request: ControlRequest,
    ) -> Result<Device, SmartHomeError> {
        let device = self.get_device(id).await?;
        let device_type = request
            .device_type
            .clone()
            .unwrap_or_else(|| device.device_type.clone());

        let validated = control::validate(&self.registry, &device_type, &request)
            .inspect_err(|err| tracing::debug!(error = %err, "control request rejected"))?;

        let updated = control::apply(device, &validated);
        self.repo.update(updated).await
    }
}

fn not_found(id: DeviceId) -> NotFoundError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
}
