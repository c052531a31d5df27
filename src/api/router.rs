//! API router.
//!
//! Returns a composable `Router` with every endpoint nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints::{appointments, chatbot, doctors, health, lab_tests, reminders};
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router over shared state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(health::check))
        .route("/reminders", get(reminders::list).post(reminders::create))
        .route(
            "/reminders/:id",
            get(reminders::detail)
                .put(reminders::update)
                .delete(reminders::delete),
        )
        .route("/reminders/:id/toggle", patch(reminders::toggle))
        .route(
            "/appointments",
            get(appointments::list).post(appointments::book),
        )
        .route(
            "/appointments/:id",
            get(appointments::detail)
                .put(appointments::update)
                .delete(appointments::cancel),
        )
        .route("/doctors", get(doctors::list))
        .route("/doctors/:id", get(doctors::detail))
        .route("/doctors/list/specialties", get(doctors::specialties))
        .route("/tests/catalog", get(lab_tests::catalog))
        .route("/tests/categories", get(lab_tests::categories))
        .route(
            "/tests/bookings",
            get(lab_tests::list_bookings).post(lab_tests::book),
        )
        .route(
            "/tests/bookings/:id",
            get(lab_tests::booking_detail)
                .put(lab_tests::update_booking)
                .delete(lab_tests::cancel_booking),
        )
        .route("/chatbot/message", post(chatbot::message))
        .route("/chatbot/tips", get(chatbot::tip))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .fallback(route_not_found)
        .layer(axum::middleware::from_fn(middleware::access_log::log_access))
        .layer(CorsLayer::permissive())
}

async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ServerConfig;
    use crate::scheduling::BookingPolicy;

    fn test_app() -> Router {
        api_router(Arc::new(CoreState::new()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_reminder(app: &Router, time: &str, kind: &str) -> Value {
        let (status, json) = send(
            app,
            "POST",
            "/api/reminders",
            Some(json!({
                "patientId": "p1",
                "type": kind,
                "title": format!("Take meds at {time}"),
                "time": time,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"].clone()
    }

    fn booking() -> Value {
        json!({
            "patientId": "p123",
            "patientName": "John Doe",
            "doctorId": "1",
            "doctorName": "Dr. Priya Sharma",
            "date": "2025-10-10",
            "time": "10:00 AM",
            "reason": "Regular checkup"
        })
    }

    // ── Health / routing ─────────────────────────────────────

    #[tokio::test]
    async fn health_response_shape() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["message"], "Sanjeevni API is running");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn unknown_route_returns_404_envelope() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/nonexistent", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
    }

    // ── Reminders ───────────────────────────────────────────

    #[tokio::test]
    async fn create_reminder_returns_201_with_defaults() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/reminders",
            Some(json!({"patientId": "p1", "type": "medicine", "title": "Metformin", "time": "08:00"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Reminder created successfully");
        let data = &json["data"];
        assert!(data["id"].is_string());
        assert_eq!(data["active"], true);
        assert_eq!(data["frequency"], "daily");
        assert_eq!(data["description"], "");
        assert_eq!(data["endDate"], Value::Null);
        assert_eq!(data["daysOfWeek"], json!([0, 1, 2, 3, 4, 5, 6]));
        assert!(data["createdAt"].is_string());
        assert!(data["startDate"].is_string());
    }

    #[tokio::test]
    async fn create_reminder_missing_type_returns_400() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/reminders",
            Some(json!({"patientId": "p1", "title": "x", "time": "09:00"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("type"));
    }

    #[tokio::test]
    async fn malformed_json_returns_400_envelope() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/reminders")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_reminders_sorted_by_time() {
        let app = test_app();
        for time in ["09:00", "08:30", "10:15"] {
            create_reminder(&app, time, "medicine").await;
        }

        let (status, json) = send(&app, "GET", "/api/reminders?patientId=p1", None).await;
        assert_eq!(status, StatusCode::OK);
        let times: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["time"].as_str().unwrap())
            .collect();
        assert_eq!(times, vec!["08:30", "09:00", "10:15"]);
    }

    #[tokio::test]
    async fn list_reminders_filters_by_type_and_patient() {
        let app = test_app();
        create_reminder(&app, "08:00", "medicine").await;
        create_reminder(&app, "09:00", "refill").await;

        let (_, json) = send(&app, "GET", "/api/reminders?patientId=p1&type=refill", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(&app, "GET", "/api/reminders?patientId=p2", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_flips_and_active_filter_follows() {
        let app = test_app();
        let first = create_reminder(&app, "08:00", "medicine").await;
        let second = create_reminder(&app, "09:00", "medicine").await;
        let id = first["id"].as_str().unwrap();

        let (status, json) = send(&app, "PATCH", &format!("/api/reminders/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["active"], false);
        assert_eq!(json["message"], "Reminder deactivated");
        assert!(json["data"]["updatedAt"].is_string());

        let (_, json) = send(&app, "GET", "/api/reminders?active=true", None).await;
        let ids: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec![second["id"].as_str().unwrap()]);

        let (_, json) = send(&app, "PATCH", &format!("/api/reminders/{id}/toggle"), None).await;
        assert_eq!(json["data"]["active"], true);
        assert_eq!(json["message"], "Reminder activated");
    }

    #[tokio::test]
    async fn delete_reminder_then_operations_404() {
        let app = test_app();
        let created = create_reminder(&app, "08:00", "medicine").await;
        let id = created["id"].as_str().unwrap();

        let (status, json) = send(&app, "DELETE", &format!("/api/reminders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Reminder deleted successfully");

        let (status, json) = send(&app, "PATCH", &format!("/api/reminders/{id}/toggle"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Reminder not found");

        let (status, _) = send(&app, "DELETE", &format!("/api/reminders/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_uuid_reminder_id_is_404() {
        let app = test_app();
        let (status, json) = send(&app, "PATCH", "/api/reminders/abc/toggle", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Reminder not found");
    }

    #[tokio::test]
    async fn get_and_update_reminder() {
        let app = test_app();
        let created = create_reminder(&app, "08:00", "medicine").await;
        let id = created["id"].as_str().unwrap();

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/reminders/{id}"),
            Some(json!({"time": "07:45", "frequency": "weekly"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["time"], "07:45");
        assert_eq!(json["data"]["frequency"], "weekly");
        assert_eq!(json["data"]["title"], created["title"]);

        let (status, json) = send(&app, "GET", &format!("/api/reminders/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["time"], "07:45");
    }

    #[tokio::test]
    async fn due_on_filter() {
        let app = test_app();
        let (_, weekly) = send(
            &app,
            "POST",
            "/api/reminders",
            Some(json!({
                "patientId": "p1", "type": "medicine", "title": "Mondays", "time": "08:00",
                "frequency": "weekly", "startDate": "2025-03-01", "daysOfWeek": [1]
            })),
        )
        .await;

        // 2025-03-03 is a Monday, 2025-03-04 a Tuesday.
        let (_, json) = send(&app, "GET", "/api/reminders?dueOn=2025-03-03", None).await;
        assert_eq!(json["data"][0]["id"], weekly["data"]["id"]);

        let (_, json) = send(&app, "GET", "/api/reminders?dueOn=2025-03-04", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        let (status, _) = send(&app, "GET", "/api/reminders?dueOn=03/03/2025", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ── Appointments ─────────────────────────────────────────

    #[tokio::test]
    async fn book_appointment_returns_201_scheduled() {
        let app = test_app();
        let (status, json) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Appointment booked successfully");
        assert_eq!(json["data"]["status"], "scheduled");
        assert_eq!(json["data"]["reason"], "Regular checkup");
    }

    #[tokio::test]
    async fn book_appointment_defaults_reason() {
        let app = test_app();
        let (_, json) = send(
            &app,
            "POST",
            "/api/appointments",
            Some(json!({"patientId": "p1", "doctorId": "2", "date": "2025-10-10", "time": "9:00 AM"})),
        )
        .await;
        assert_eq!(json["data"]["reason"], "General consultation");
    }

    #[tokio::test]
    async fn book_appointment_missing_doctor_returns_400() {
        let app = test_app();
        let mut body = booking();
        body.as_object_mut().unwrap().remove("doctorId");
        let (status, json) = send(&app, "POST", "/api/appointments", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn identical_bookings_both_succeed() {
        let app = test_app();
        let (s1, first) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        let (s2, second) = send(&app, "POST", "/api/appointments", Some(booking())).await;

        assert_eq!(s1, StatusCode::CREATED);
        assert_eq!(s2, StatusCode::CREATED);
        assert_ne!(first["data"]["id"], second["data"]["id"]);

        let (_, json) = send(&app, "GET", "/api/appointments?patientId=p123", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn strict_policy_returns_409_for_taken_slot() {
        let config = ServerConfig {
            booking_policy: BookingPolicy::RejectDoubleBooking,
            ..ServerConfig::default()
        };
        let app = api_router(Arc::new(CoreState::from_config(&config)));

        let (status, _) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, json) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn update_appointment_status_only() {
        let app = test_app();
        let (_, booked) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        let id = booked["data"]["id"].as_str().unwrap();

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/appointments/{id}"),
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Appointment updated successfully");

        let mut expected = booked["data"].clone();
        expected["status"] = json!("completed");
        let mut actual = json["data"].clone();
        assert!(actual["updatedAt"].is_string());
        actual.as_object_mut().unwrap().remove("updatedAt");
        assert_eq!(actual, expected);

        let (_, json) = send(&app, "GET", "/api/appointments?status=completed", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        let (_, json) = send(&app, "GET", "/api/appointments?status=scheduled", None).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_unknown_appointment_is_404() {
        let app = test_app();
        let id = uuid::Uuid::new_v4();
        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/appointments/{id}"),
            Some(json!({"status": "completed"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Appointment not found");
    }

    #[tokio::test]
    async fn cancel_appointment_removes_it() {
        let app = test_app();
        let (_, booked) = send(&app, "POST", "/api/appointments", Some(booking())).await;
        let id = booked["data"]["id"].as_str().unwrap();

        let (status, json) = send(&app, "DELETE", &format!("/api/appointments/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Appointment cancelled successfully");

        let (status, _) = send(&app, "GET", &format!("/api/appointments/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &format!("/api/appointments/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ── Lab tests ────────────────────────────────────────────

    #[tokio::test]
    async fn lab_catalog_and_categories() {
        let app = test_app();
        let (_, json) = send(&app, "GET", "/api/tests/catalog?category=Radiology", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["name"], "X-Ray Chest");

        let (_, json) = send(&app, "GET", "/api/tests/catalog?search=sugar", None).await;
        assert_eq!(json["data"][0]["id"], "t3");
        assert_eq!(json["data"][0]["preparationNote"], "8-12 hours fasting required");

        let (_, json) = send(&app, "GET", "/api/tests/categories", None).await;
        assert_eq!(json["data"], json!(["Blood Test", "Radiology"]));
    }

    #[tokio::test]
    async fn test_booking_lifecycle() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/tests/bookings",
            Some(json!({
                "patientId": "p1", "testId": "t1", "date": "2025-10-12",
                "time": "07:30", "homeCollection": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Test booked successfully");
        assert_eq!(json["data"]["testName"], "Complete Blood Count (CBC)");
        assert_eq!(json["data"]["price"], 400);
        assert_eq!(json["data"]["status"], "scheduled");
        assert!(json["data"]["reportUrl"].is_null());
        let id = json["data"]["id"].as_str().unwrap().to_string();

        let (status, json) = send(
            &app,
            "PUT",
            &format!("/api/tests/bookings/{id}"),
            Some(json!({"status": "completed", "reportUrl": "https://reports/cbc.pdf"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Booking updated successfully");
        assert_eq!(json["data"]["reportUrl"], "https://reports/cbc.pdf");
        assert_eq!(json["data"]["homeCollection"], true);

        let (_, json) = send(&app, "GET", "/api/tests/bookings?patientId=p1&status=completed", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (status, json) = send(&app, "DELETE", &format!("/api/tests/bookings/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Booking cancelled successfully");

        let (status, json) = send(&app, "GET", &format!("/api/tests/bookings/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Booking not found");
    }

    #[tokio::test]
    async fn booking_unknown_test_returns_404() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/tests/bookings",
            Some(json!({"patientId": "p1", "testId": "t42", "date": "2025-10-12", "time": "07:30"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Test not found");

        let (status, _) = send(
            &app,
            "POST",
            "/api/tests/bookings",
            Some(json!({"patientId": "p1", "date": "2025-10-12", "time": "07:30"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_optional_fields_fall_back_over_http() {
        let app = test_app();
        let (_, json) = send(
            &app,
            "POST",
            "/api/reminders",
            Some(json!({
                "patientId": "p1", "type": "medicine", "title": "x", "time": "08:00",
                "frequency": "", "startDate": "", "endDate": ""
            })),
        )
        .await;
        assert_eq!(json["data"]["frequency"], "daily");
        assert_ne!(json["data"]["startDate"], "");
        assert!(json["data"]["endDate"].is_null());

        let mut body = booking();
        body["reason"] = json!("");
        let (_, json) = send(&app, "POST", "/api/appointments", Some(body)).await;
        assert_eq!(json["data"]["reason"], "General consultation");
    }

    // ── Directory / assistant ────────────────────────────────

    #[tokio::test]
    async fn doctors_endpoints() {
        let app = test_app();
        let (_, json) = send(&app, "GET", "/api/doctors?specialty=ortho", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["name"], "Dr. Rajesh Kumar");

        let (status, json) = send(&app, "GET", "/api/doctors/4", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["hospital"], "Manipal Hospital");

        let (status, json) = send(&app, "GET", "/api/doctors/42", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Doctor not found");

        let (_, json) = send(&app, "GET", "/api/doctors/list/specialties", None).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn chatbot_message_and_tips() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/chatbot/message",
            Some(json!({"message": "I need an ambulance", "patientId": "p1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["userMessage"], "I need an ambulance");
        assert!(json["data"]["botReply"].as_str().unwrap().contains("108"));

        let (status, json) = send(&app, "POST", "/api/chatbot/message", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Message is required");

        let (status, json) = send(&app, "GET", "/api/chatbot/tips", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["tip"].is_string());
    }
}
