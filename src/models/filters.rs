use chrono::NaiveDate;

use super::enums::{AppointmentStatus, ReminderType};

/// Conjunctive reminder filter. `None` fields match everything.
#[derive(Debug, Default, Clone)]
pub struct ReminderFilter {
    pub patient_id: Option<String>,
    pub reminder_type: Option<ReminderType>,
    pub active: Option<bool>,
    /// Keep only active reminders that fire on this day.
    pub due_on: Option<NaiveDate>,
}

#[derive(Debug, Default, Clone)]
pub struct AppointmentFilter {
    pub patient_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Default, Clone)]
pub struct DoctorFilter {
    pub specialty: Option<String>,
    pub hospital: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct TestBookingFilter {
    pub patient_id: Option<String>,
    pub status: Option<AppointmentStatus>,
}

/// Catalog filter: exact `category`, case-insensitive `search` on the name.
#[derive(Debug, Default, Clone)]
pub struct LabTestFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}
