//! Shared application state for axum handlers.

use std::sync::Arc;

use smarthome_app::ports::{AutomationRepository, DeviceRepository};
use smarthome_app::services::automation_service::AutomationService;
use smarthome_app::services::device_service::DeviceService;

/// Application state shared across all axum handlers.
///
/// Generic over the device and automation repositories to avoid dynamic
/// dispatch. `Clone` is implemented manually so the repositories themselves
/// do not need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<DR, AR> {
    /// Device CRUD and control service.
    pub device_service: Arc<DeviceService<DR>>,
    /// Automation rule CRUD service.
    pub automation_service: Arc<AutomationService<AR>>,
}

impl<DR, AR> Clone for AppState<DR, AR> {
    fn clone(&self) -> Self {
        Self {
            device_service: Arc::clone(&self.device_service),
            automation_service: Arc::clone(&self.automation_service),
        }
    }
}

impl<DR, AR> AppState<DR, AR>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(device_service: DeviceService<DR>, automation_service: AutomationService<AR>) -> Self {
        Self {
            device_service: Arc::new(device_service),
            automation_service: Arc::new(automation_service),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    pub fn from_arcs(
        device_service: Arc<DeviceService<DR>>,
        automation_service: Arc<AutomationService<AR>>,
    ) -> Self {
        Self {
            device_service,
            automation_service,
        }
    }
}
