//! Reminder endpoints.
//!
//! - `GET /api/reminders`: list, filtered by `patientId`, `type`, `active`, `dueOn`
//! - `POST /api/reminders`: create
//! - `GET /api/reminders/:id`: single reminder
//! - `PUT /api/reminders/:id`: partial update
//! - `PATCH /api/reminders/:id/toggle`: flip active
//! - `DELETE /api/reminders/:id`: hard delete

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{parse_entity_id, ApiContext, ApiResponse};
use crate::models::{NewReminder, Reminder, ReminderFilter, ReminderPatch, ReminderType};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderListQuery {
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    pub active: Option<String>,
    pub due_on: Option<String>,
}

impl ReminderListQuery {
    /// Empty `patientId`/`type` values mean "no filter". `active` matches
    /// `true` only for the literal string "true".
    fn into_filter(self) -> Result<ReminderFilter, ApiError> {
        let due_on = match self.due_on.filter(|v| !v.is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                    .map_err(|_| ApiError::BadRequest(format!("Invalid dueOn date: {raw}")))?,
            ),
            None => None,
        };

        Ok(ReminderFilter {
            patient_id: self.patient_id.filter(|v| !v.is_empty()),
            reminder_type: self
                .reminder_type
                .filter(|v| !v.is_empty())
                .map(ReminderType::from),
            active: self.active.map(|v| v == "true"),
            due_on,
        })
    }
}

/// `GET /api/reminders`
pub async fn list(
    State(ctx): State<ApiContext>,
    query: Result<Query<ReminderListQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Reminder>>>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let reminders = ctx.core.scheduling().list_reminders(&filter)?;
    Ok(Json(ApiResponse::data(reminders)))
}

/// `GET /api/reminders/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let id = parse_entity_id(&id, "Reminder")?;
    let reminder = ctx.core.scheduling().get_reminder(&id)?;
    Ok(Json(ApiResponse::data(reminder)))
}

/// `POST /api/reminders`
pub async fn create(
    State(ctx): State<ApiContext>,
    payload: Result<Json<NewReminder>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Reminder>>), ApiError> {
    let Json(new) = payload?;
    let reminder = ctx.core.scheduling().create_reminder(new)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(reminder).with_message("Reminder created successfully")),
    ))
}

/// `PUT /api/reminders/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    payload: Result<Json<ReminderPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let id = parse_entity_id(&id, "Reminder")?;
    let Json(patch) = payload?;
    let reminder = ctx.core.scheduling().update_reminder(&id, patch)?;
    Ok(Json(
        ApiResponse::data(reminder).with_message("Reminder updated successfully"),
    ))
}

/// `PATCH /api/reminders/:id/toggle`
pub async fn toggle(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reminder>>, ApiError> {
    let id = parse_entity_id(&id, "Reminder")?;
    let reminder = ctx.core.scheduling().toggle_reminder(&id)?;
    let message = if reminder.active {
        "Reminder activated"
    } else {
        "Reminder deactivated"
    };
    Ok(Json(ApiResponse::data(reminder).with_message(message)))
}

/// `DELETE /api/reminders/:id`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_entity_id(&id, "Reminder")?;
    ctx.core.scheduling().delete_reminder(&id)?;
    Ok(Json(ApiResponse::message("Reminder deleted successfully")))
}
