//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod appliances;
#[allow(clippy::missing_errors_doc)]
pub mod automations;
pub mod device_types;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::{get, post};

use smarthome_app::ports::{AutomationRepository, DeviceRepository};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<DR, AR>() -> Router<AppState<DR, AR>>
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    Router::new()
        // Devices
        .route(
            "/devices",
            get(devices::list::<DR, AR>).post(devices::create::<DR, AR>),
        )
        .route(
            "/devices/{id}",
            get(devices::get::<DR, AR>)
                .put(devices::update::<DR, AR>)
                .delete(devices::delete::<DR, AR>),
        )
        .route("/devices/{id}/on", post(devices::turn_on::<DR, AR>))
        .route("/devices/{id}/off", post(devices::turn_off::<DR, AR>))
        .route("/devices/{id}/state", post(devices::set_state::<DR, AR>))
        .route("/devices/{id}/control", post(devices::control::<DR, AR>))
        .route("/device-types", get(device_types::list::<DR, AR>))
        // Automation rules
        .route(
            "/automation-rules",
            get(automations::list::<DR, AR>).post(automations::create::<DR, AR>),
        )
        .route(
            "/automation-rules/{id}",
            get(automations::get::<DR, AR>)
                .put(automations::update::<DR, AR>)
                .delete(automations::delete::<DR, AR>),
        )
        // Appliances
        .route("/cameras/control", post(appliances::camera))
        .route("/tvs/control", post(appliances::tv))
        .route("/doors/control", post(appliances::door))
}
