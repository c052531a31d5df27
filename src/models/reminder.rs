use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::double_option;
use super::enums::{ReminderFrequency, ReminderType};

/// Days a reminder recurs on when nothing else is supplied (0 = Sunday).
pub const ALL_DAYS_OF_WEEK: [i64; 7] = [0, 1, 2, 3, 4, 5, 6];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub reminder_type: ReminderType,
    pub title: String,
    pub description: String,
    /// "HH:MM" as supplied by the client. Never reparsed.
    pub time: String,
    pub frequency: ReminderFrequency,
    pub start_date: String,
    pub end_date: Option<String>,
    pub days_of_week: Vec<i64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation request. Required fields are optional here so that a missing
/// one surfaces as a validation error rather than a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReminder {
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days_of_week: Option<Vec<i64>>,
}

/// Partial update. Absent fields are left untouched; `endDate: null`
/// clears the end date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPatch {
    pub patient_id: Option<String>,
    #[serde(rename = "type")]
    pub reminder_type: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub time: Option<String>,
    pub frequency: Option<String>,
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_date: Option<Option<String>>,
    pub days_of_week: Option<Vec<i64>>,
    pub active: Option<bool>,
}

impl Reminder {
    /// Merge `patch` over this reminder and stamp `updated_at`.
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: ReminderPatch, now: DateTime<Utc>) {
        if let Some(v) = patch.patient_id {
            self.patient_id = v;
        }
        if let Some(v) = patch.reminder_type {
            self.reminder_type = ReminderType::from(v);
        }
        if let Some(v) = patch.title {
            self.title = v;
        }
        if let Some(v) = patch.description {
            self.description = v;
        }
        if let Some(v) = patch.time {
            self.time = v;
        }
        if let Some(v) = patch.frequency {
            self.frequency = ReminderFrequency::from(v);
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.end_date {
            self.end_date = v;
        }
        if let Some(v) = patch.days_of_week {
            self.days_of_week = v;
        }
        if let Some(v) = patch.active {
            self.active = v;
        }
        self.updated_at = Some(now);
    }
}
