use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use super::enums::AppointmentStatus;

pub const DEFAULT_REASON: &str = "General consultation";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub patient_name: Option<String>,
    pub doctor_id: String,
    pub doctor_name: Option<String>,
    /// Calendar date as supplied, e.g. "2025-10-10".
    pub date: String,
    /// Display time as supplied, e.g. "10:00 AM". Not parsed.
    pub time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub patient_id: Option<String>,
    pub patient_name: Option<String>,
    pub doctor_id: Option<String>,
    pub doctor_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    pub patient_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub patient_name: Option<Option<String>>,
    pub doctor_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub doctor_name: Option<Option<String>>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub reason: Option<String>,
    pub status: Option<String>,
}

impl Appointment {
    /// Whether this booking occupies the given doctor slot.
    pub fn holds_slot(&self, doctor_id: &str, date: &str, time: &str) -> bool {
        self.status != AppointmentStatus::Cancelled
            && self.doctor_id == doctor_id
            && self.date == date
            && self.time == time
    }

    /// Merge `patch` over this appointment and stamp `updated_at`.
    /// Status strings are taken as-is; no transition is enforced.
    pub fn apply(&mut self, patch: AppointmentPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.patient_id {
            self.patient_id = v;
        }
        if let Some(v) = patch.patient_name {
            self.patient_name = v;
        }
        if let Some(v) = patch.doctor_id {
            self.doctor_id = v;
        }
        if let Some(v) = patch.doctor_name {
            self.doctor_name = v;
        }
        if let Some(v) = patch.date {
            self.date = v;
        }
        if let Some(v) = patch.time {
            self.time = v;
        }
        if let Some(v) = patch.reason {
            self.reason = v;
        }
        if let Some(v) = patch.status {
            self.status = AppointmentStatus::from(v);
        }
        self.updated_at = Some(now);
    }
}
