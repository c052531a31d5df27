//! Scheduling store: the single owner of reminders, appointments and
//! lab-test bookings.
//!
//! HTTP handlers reach the store only through [`SchedulingRepository`],
//! injected via `CoreState`. The in-memory implementation keeps each
//! collection behind its own lock; no operation spans both.

pub mod ordering;
pub mod recurrence;
pub mod store;
mod validation;

pub use ordering::TimeOrder;
pub use store::InMemorySchedulingStore;

use thiserror::Error;
use uuid::Uuid;

use crate::models::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Doctor {doctor_id} is already booked on {date} at {time}")]
    SlotTaken {
        doctor_id: String,
        date: String,
        time: String,
    },

    #[error("Internal lock error")]
    LockPoisoned,
}

impl SchedulingError {
    pub(crate) fn reminder_not_found(id: &Uuid) -> Self {
        Self::NotFound {
            entity: "Reminder",
            id: id.to_string(),
        }
    }

    pub(crate) fn appointment_not_found(id: &Uuid) -> Self {
        Self::NotFound {
            entity: "Appointment",
            id: id.to_string(),
        }
    }

    pub(crate) fn test_booking_not_found(id: &Uuid) -> Self {
        Self::NotFound {
            entity: "Booking",
            id: id.to_string(),
        }
    }

    pub(crate) fn lab_test_not_found(test_id: &str) -> Self {
        Self::NotFound {
            entity: "Test",
            id: test_id.to_string(),
        }
    }
}

/// Whether two bookings may hold the same doctor/date/time slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookingPolicy {
    /// Any number of bookings per slot (the service's historical behaviour).
    #[default]
    AllowDoubleBooking,
    /// Reject a booking whose slot is held by a non-cancelled appointment.
    RejectDoubleBooking,
}

/// Lifecycle operations over reminders, appointments and test bookings.
///
/// All failures are synchronous and never retried.
pub trait SchedulingRepository: Send + Sync {
    /// Reminders matching every supplied filter, ordered by `time`.
    /// Ties keep insertion order.
    fn list_reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, SchedulingError>;

    fn get_reminder(&self, id: &Uuid) -> Result<Reminder, SchedulingError>;

    /// Store a new active reminder. Fails when `patientId`, `type`,
    /// `title` or `time` is missing or blank.
    fn create_reminder(&self, new: NewReminder) -> Result<Reminder, SchedulingError>;

    fn update_reminder(&self, id: &Uuid, patch: ReminderPatch)
        -> Result<Reminder, SchedulingError>;

    /// Flip `active`. Each call flips again; this is not idempotent.
    fn toggle_reminder(&self, id: &Uuid) -> Result<Reminder, SchedulingError>;

    /// Permanent removal.
    fn delete_reminder(&self, id: &Uuid) -> Result<(), SchedulingError>;

    /// Appointments matching every supplied filter, in booking order.
    fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    fn get_appointment(&self, id: &Uuid) -> Result<Appointment, SchedulingError>;

    /// Store a new `scheduled` appointment. Fails when `patientId`,
    /// `doctorId`, `date` or `time` is missing or blank.
    fn book_appointment(&self, new: NewAppointment) -> Result<Appointment, SchedulingError>;

    fn update_appointment(
        &self,
        id: &Uuid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, SchedulingError>;

    /// Permanent removal. The row is dropped, not marked `cancelled`.
    fn cancel_appointment(&self, id: &Uuid) -> Result<(), SchedulingError>;

    /// Test bookings matching every supplied filter, in booking order.
    fn list_test_bookings(
        &self,
        filter: &TestBookingFilter,
    ) -> Result<Vec<TestBooking>, SchedulingError>;

    fn get_test_booking(&self, id: &Uuid) -> Result<TestBooking, SchedulingError>;

    /// Store a new `scheduled` test booking. Fails validation when
    /// `patientId`, `testId`, `date` or `time` is missing or blank, and
    /// with `NotFound` when `testId` is not in the catalog.
    fn book_test(&self, new: NewTestBooking) -> Result<TestBooking, SchedulingError>;

    fn update_test_booking(
        &self,
        id: &Uuid,
        patch: TestBookingPatch,
    ) -> Result<TestBooking, SchedulingError>;

    /// Permanent removal.
    fn cancel_test_booking(&self, id: &Uuid) -> Result<(), SchedulingError>;
}
