//! Appointment endpoints.
//!
//! - `GET /api/appointments`: list, filtered by `patientId`, `status`
//! - `POST /api/appointments`: book
//! - `GET /api/appointments/:id`: single appointment
//! - `PUT /api/appointments/:id`: partial update
//! - `DELETE /api/appointments/:id`: cancel (hard delete)

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_entity_id, ApiContext, ApiResponse};
use crate::models::{
    Appointment, AppointmentFilter, AppointmentPatch, AppointmentStatus, NewAppointment,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListQuery {
    pub patient_id: Option<String>,
    pub status: Option<String>,
}

/// `GET /api/appointments`
pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<AppointmentListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Appointment>>>, ApiError> {
    let Query(query) = query?;
    let filter = AppointmentFilter {
        patient_id: query.patient_id.filter(|v| !v.is_empty()),
        status: query
            .status
            .filter(|v| !v.is_empty())
            .map(AppointmentStatus::from),
    };
    let appointments = ctx.core.scheduling().list_appointments(&filter)?;
    Ok(Json(ApiResponse::data(appointments)))
}

/// `GET /api/appointments/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    let id = parse_entity_id(&id, "Appointment")?;
    let appointment = ctx.core.scheduling().get_appointment(&id)?;
    Ok(Json(ApiResponse::data(appointment)))
}

/// `POST /api/appointments`
///
/// Identical doctor/date/time bookings are accepted unless the server
/// runs with the reject-double-booking policy (then 409).
pub async fn book(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewAppointment>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Appointment>>), ApiError> {
    let Json(new) = payload?;
    let appointment = ctx.core.scheduling().book_appointment(new)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(appointment).with_message("Appointment booked successfully")),
    ))
}

/// `PUT /api/appointments/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<AppointmentPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<Appointment>>, ApiError> {
    let id = parse_entity_id(&id, "Appointment")?;
    let Json(patch) = payload?;
    let appointment = ctx.core.scheduling().update_appointment(&id, patch)?;
    Ok(Json(
        ApiResponse::data(appointment).with_message("Appointment updated successfully"),
    ))
}

/// `DELETE /api/appointments/:id`
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_entity_id(&id, "Appointment")?;
    ctx.core.scheduling().cancel_appointment(&id)?;
    Ok(Json(ApiResponse::message("Appointment cancelled successfully")))
}
