//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use smarthome_app::ports::{AutomationRepository, DeviceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests API routes under `/api` and includes a [`TraceLayer`] that logs each
/// HTTP request/response using the `tracing` ecosystem. When `cors_permissive`
/// is set, any origin may call the API.
pub fn build<DR, AR>(state: AppState<DR, AR>, cors_permissive: bool) -> Router
where
    DR: DeviceRepository + Send + Sync + 'static,
    AR: AutomationRepository + Send + Sync + 'static,
{
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http());

    let router = if cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use smarthome_app::services::automation_service::AutomationService;
    use smarthome_app::services::device_service::DeviceService;
    use smarthome_domain::automation::AutomationRule;
    use smarthome_domain::device::Device;
    use smarthome_domain::device_type::DeviceTypeRegistry;
    use smarthome_domain::error::SmartHomeError;
    use smarthome_domain::id::{AutomationId, DeviceId};
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    #[derive(Default)]
    struct MemDeviceRepo(Mutex<Vec<Device>>);

    #[derive(Default)]
    struct MemAutomationRepo(Mutex<Vec<AutomationRule>>);

    impl DeviceRepository for MemDeviceRepo {
        async fn create(&self, device: Device) -> Result<Device, SmartHomeError> {
            self.0.lock().unwrap().push(device.clone());
            Ok(device)
        }
        async fn get_by_id(&self, id: DeviceId) -> Result<Option<Device>, SmartHomeError> {
            Ok(self.0.lock().unwrap().iter().find(|d| d.id == id).cloned())
        }
        async fn get_all(&self) -> Result<Vec<Device>, SmartHomeError> {
            Ok(self.0.lock().unwrap().clone())
        }
        async fn update(&self, device: Device) -> Result<Device, SmartHomeError> {
            let mut store = self.0.lock().unwrap();
            if let Some(slot) = store.iter_mut().find(|d| d.id == device.id) {
                *slot = device.clone();
            }
            Ok(device)
        }
        async fn delete(&self, id: DeviceId) -> Result<bool, SmartHomeError> {
            let mut store = self.0.lock().unwrap();
            let before = store.len();
            store.retain(|d| d.id != id);
            Ok(store.len() != before)
        }
    }

    impl AutomationRepository for MemAutomationRepo {
        async fn create(&self, rule: AutomationRule) -> Result<AutomationRule, SmartHomeError> {
            self.0.lock().unwrap().push(rule.clone());
            Ok(rule)
        }
        async fn get_by_id(
            &self,
            id: AutomationId,
        ) -> Result<Option<AutomationRule>, SmartHomeError> {
            Ok(self.0.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }
        async fn get_all(&self) -> Result<Vec<AutomationRule>, SmartHomeError> {
            Ok(self.0.lock().unwrap().clone())
        }
        async fn update(&self, rule: AutomationRule) -> Result<AutomationRule, SmartHomeError> {
            let mut store = self.0.lock().unwrap();
            if let Some(slot) = store.iter_mut().find(|r| r.id == rule.id) {
                *slot = rule.clone();
            }
            Ok(rule)
        }
        async fn delete(&self, id: AutomationId) -> Result<bool, SmartHomeError> {
            let mut store = self.0.lock().unwrap();
            let before = store.len();
            store.retain(|r| r.id != id);
            Ok(store.len() != before)
        }
    }

    fn app() -> Router {
        let state = AppState::new(
            DeviceService::new(
                MemDeviceRepo::default(),
                Arc::new(DeviceTypeRegistry::builtin()),
            ),
            AutomationService::new(MemAutomationRepo::default()),
        );
        build(state, true)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn create_device(app: &Router, name: &str, device_type: &str) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/devices",
            Some(json!({"name": name, "type": device_type})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_reject_device_without_name() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/devices", Some(json!({"type": "light"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name must not be empty");
    }

    #[tokio::test]
    async fn should_reject_device_with_unknown_status() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/devices",
            Some(json!({"name": "Lamp", "type": "light", "status": "dimmed"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_bad_request_when_id_is_malformed() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/devices/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid id");
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_device() {
        let app = app();
        let uri = format!("/api/devices/{}/control", DeviceId::new());
        let (status, _) = send(&app, "POST", &uri, Some(json!({"action": "Turn On"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_raise_ac_temperature_through_control() {
        let app = app();
        let id = create_device(&app, "Bedroom AC", "ac").await;
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/devices/{id}/state"),
            Some(json!({"temperature": 20.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/devices/{id}/control"),
            Some(json!({"action": "IncreaseTemp", "value": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["temperature"], 25.0);
    }

    #[tokio::test]
    async fn should_reject_disallowed_action_without_mutating() {
        let app = app();
        let id = create_device(&app, "Desk lamp", "light").await;

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/devices/{id}/control"),
            Some(json!({"action": "Explode", "status": "on"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Explode"));

        let (_, device) = send(&app, "GET", &format!("/api/devices/{id}"), None).await;
        assert_eq!(device["status"], Value::Null);
    }

    #[tokio::test]
    async fn should_answer_turn_on_with_message_and_device() {
        let app = app();
        let id = create_device(&app, "Fridge", "refrigerator").await;

        let (status, body) = send(&app, "POST", &format!("/api/devices/{id}/on"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Device turned on");
        assert_eq!(body["device"]["status"], "on");
    }

    #[tokio::test]
    async fn should_delete_device_then_report_not_found() {
        let app = app();
        let id = create_device(&app, "Fridge", "refrigerator").await;
        let uri = format!("/api/devices/{id}");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_list_builtin_device_types() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/device-types", None).await;
        assert_eq!(status, StatusCode::OK);

        let moon = body
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["type"] == "moon_light")
            .unwrap();
        assert_eq!(moon["default_command"], "moon_light");
    }

    #[tokio::test]
    async fn should_create_and_patch_automation_rule() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/api/automation-rules",
            Some(json!({
                "name": "Evening lights",
                "trigger": {"type": "time", "value": "19:00"},
                "action": {"type": "device", "value": "light:on"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/automation-rules/{id}"),
            Some(json!({"trigger": {"value": "20:00"}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["trigger"]["type"], "time");
        assert_eq!(updated["trigger"]["value"], "20:00");
    }

    #[tokio::test]
    async fn should_reject_rule_without_action() {
        let app = app();
        let (status, _) = send(
            &app,
            "POST",
            "/api/automation-rules",
            Some(json!({"name": "Broken", "trigger": {"type": "time", "value": "19:00"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_acknowledge_camera_recording() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/cameras/control",
            Some(json!({"action": "record", "duration": 30})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Camera started recording for 30 seconds");
    }

    #[tokio::test]
    async fn should_reject_door_without_status() {
        let app = app();
        let (status, _) = send(&app, "POST", "/api/doors/control", Some(json!({"action": "lock"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
