//! Storage port: the device record store.

use std::future::Future;

use smarthome_domain::device::Device;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::id::DeviceId;

/// Repository for persisting and querying [`Device`]s.
///
/// `update` replaces the whole record. Concurrent read-modify-write cycles on
/// the same device are not coordinated: the last write wins.
pub trait DeviceRepository {
    /// Create a new device in storage.
    fn create(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    /// Get a device by its unique identifier.
    fn get_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, SmartHomeError>> + Send;

    /// Get all devices, oldest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Device>, SmartHomeError>> + Send;

    /// Replace an existing device record.
    fn update(&self, device: Device) -> impl Future<Output = Result<Device, SmartHomeError>> + Send;

    /// Delete a device, returning whether a record was removed.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<bool, SmartHomeError>> + Send;
}
