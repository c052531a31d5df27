use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use super::ordering::{self, TimeOrder};
use super::recurrence;
use super::validation::{non_blank, RequiredFields};
use super::{BookingPolicy, SchedulingError, SchedulingRepository};
use crate::lab_catalog::LabCatalog;
use crate::models::*;

/// Process-memory scheduling store.
///
/// Each collection is locked independently. Vectors keep insertion
/// order, which list operations rely on.
pub struct InMemorySchedulingStore {
    reminders: RwLock<Vec<Reminder>>,
    appointments: RwLock<Vec<Appointment>>,
    test_bookings: RwLock<Vec<TestBooking>>,
    lab_catalog: LabCatalog,
    booking_policy: BookingPolicy,
    time_order: TimeOrder,
}

impl Default for InMemorySchedulingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySchedulingStore {
    pub fn new() -> Self {
        Self {
            reminders: RwLock::new(Vec::new()),
            appointments: RwLock::new(Vec::new()),
            test_bookings: RwLock::new(Vec::new()),
            lab_catalog: LabCatalog::builtin(),
            booking_policy: BookingPolicy::default(),
            time_order: ordering::lexicographic,
        }
    }

    pub fn with_booking_policy(mut self, policy: BookingPolicy) -> Self {
        self.booking_policy = policy;
        self
    }

    pub fn with_time_order(mut self, order: TimeOrder) -> Self {
        self.time_order = order;
        self
    }

    pub fn booking_policy(&self) -> BookingPolicy {
        self.booking_policy
    }

    fn read_reminders(&self) -> Result<RwLockReadGuard<'_, Vec<Reminder>>, SchedulingError> {
        self.reminders.read().map_err(|_| SchedulingError::LockPoisoned)
    }

    fn write_reminders(&self) -> Result<RwLockWriteGuard<'_, Vec<Reminder>>, SchedulingError> {
        self.reminders.write().map_err(|_| SchedulingError::LockPoisoned)
    }

    fn read_appointments(
        &self,
    ) -> Result<RwLockReadGuard<'_, Vec<Appointment>>, SchedulingError> {
        self.appointments.read().map_err(|_| SchedulingError::LockPoisoned)
    }

    fn write_appointments(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Vec<Appointment>>, SchedulingError> {
        self.appointments.write().map_err(|_| SchedulingError::LockPoisoned)
    }

    fn read_test_bookings(
        &self,
    ) -> Result<RwLockReadGuard<'_, Vec<TestBooking>>, SchedulingError> {
        self.test_bookings.read().map_err(|_| SchedulingError::LockPoisoned)
    }

    fn write_test_bookings(
        &self,
    ) -> Result<RwLockWriteGuard<'_, Vec<TestBooking>>, SchedulingError> {
        self.test_bookings.write().map_err(|_| SchedulingError::LockPoisoned)
    }
}

fn reminder_matches(reminder: &Reminder, filter: &ReminderFilter) -> bool {
    if let Some(patient_id) = &filter.patient_id {
        if &reminder.patient_id != patient_id {
            return false;
        }
    }
    if let Some(kind) = &filter.reminder_type {
        if &reminder.reminder_type != kind {
            return false;
        }
    }
    if let Some(active) = filter.active {
        if reminder.active != active {
            return false;
        }
    }
    if let Some(day) = filter.due_on {
        if !reminder.active || !recurrence::occurs_on(reminder, day) {
            return false;
        }
    }
    true
}

fn appointment_matches(appointment: &Appointment, filter: &AppointmentFilter) -> bool {
    if let Some(patient_id) = &filter.patient_id {
        if &appointment.patient_id != patient_id {
            return false;
        }
    }
    if let Some(status) = &filter.status {
        if &appointment.status != status {
            return false;
        }
    }
    true
}

fn test_booking_matches(booking: &TestBooking, filter: &TestBookingFilter) -> bool {
    filter
        .patient_id
        .as_ref()
        .map_or(true, |p| &booking.patient_id == p)
        && filter.status.as_ref().map_or(true, |s| &booking.status == s)
}

impl SchedulingRepository for InMemorySchedulingStore {
    fn list_reminders(&self, filter: &ReminderFilter) -> Result<Vec<Reminder>, SchedulingError> {
        let mut matched: Vec<Reminder> = {
            let reminders = self.read_reminders()?;
            reminders
                .iter()
                .filter(|r| reminder_matches(r, filter))
                .cloned()
                .collect()
        };
        ordering::sort_by_time(&mut matched, self.time_order);
        Ok(matched)
    }

    fn get_reminder(&self, id: &Uuid) -> Result<Reminder, SchedulingError> {
        self.read_reminders()?
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| SchedulingError::reminder_not_found(id))
    }

    fn create_reminder(&self, new: NewReminder) -> Result<Reminder, SchedulingError> {
        let mut required = RequiredFields::default();
        let patient_id = required.take("patientId", new.patient_id);
        let reminder_type = required.take("type", new.reminder_type);
        let title = required.take("title", new.title);
        let time = required.take("time", new.time);
        required.finish()?;

        let now = Utc::now();
        let reminder = Reminder {
            id: Uuid::new_v4(),
            patient_id,
            reminder_type: ReminderType::from(reminder_type),
            title,
            description: non_blank(new.description).unwrap_or_default(),
            time,
            frequency: non_blank(new.frequency)
                .map(ReminderFrequency::from)
                .unwrap_or_default(),
            start_date: non_blank(new.start_date)
                .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true)),
            end_date: non_blank(new.end_date),
            days_of_week: new
                .days_of_week
                .unwrap_or_else(|| ALL_DAYS_OF_WEEK.to_vec()),
            active: true,
            created_at: now,
            updated_at: None,
        };

        self.write_reminders()?.push(reminder.clone());
        tracing::info!(
            reminder_id = %reminder.id,
            patient_id = %reminder.patient_id,
            reminder_type = %reminder.reminder_type,
            "Reminder created"
        );
        Ok(reminder)
    }

    fn update_reminder(
        &self,
        id: &Uuid,
        patch: ReminderPatch,
    ) -> Result<Reminder, SchedulingError> {
        let mut reminders = self.write_reminders()?;
        let reminder = reminders
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| SchedulingError::reminder_not_found(id))?;
        reminder.apply(patch, Utc::now());
        tracing::debug!(reminder_id = %id, "Reminder updated");
        Ok(reminder.clone())
    }

    fn toggle_reminder(&self, id: &Uuid) -> Result<Reminder, SchedulingError> {
        let mut reminders = self.write_reminders()?;
        let reminder = reminders
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| SchedulingError::reminder_not_found(id))?;
        reminder.active = !reminder.active;
        reminder.updated_at = Some(Utc::now());
        tracing::debug!(reminder_id = %id, active = reminder.active, "Reminder toggled");
        Ok(reminder.clone())
    }

    fn delete_reminder(&self, id: &Uuid) -> Result<(), SchedulingError> {
        let mut reminders = self.write_reminders()?;
        let index = reminders
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| SchedulingError::reminder_not_found(id))?;
        reminders.remove(index);
        tracing::info!(reminder_id = %id, "Reminder deleted");
        Ok(())
    }

    fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.read_appointments()?;
        Ok(appointments
            .iter()
            .filter(|a| appointment_matches(a, filter))
            .cloned()
            .collect())
    }

    fn get_appointment(&self, id: &Uuid) -> Result<Appointment, SchedulingError> {
        self.read_appointments()?
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| SchedulingError::appointment_not_found(id))
    }

    fn book_appointment(&self, new: NewAppointment) -> Result<Appointment, SchedulingError> {
        let mut required = RequiredFields::default();
        let patient_id = required.take("patientId", new.patient_id);
        let doctor_id = required.take("doctorId", new.doctor_id);
        let date = required.take("date", new.date);
        let time = required.take("time", new.time);
        required.finish()?;

        // Slot check and insert under one write guard.
        let mut appointments = self.write_appointments()?;

        if self.booking_policy == BookingPolicy::RejectDoubleBooking
            && appointments
                .iter()
                .any(|a| a.holds_slot(&doctor_id, &date, &time))
        {
            tracing::warn!(%doctor_id, %date, %time, "Booking rejected, slot taken");
            return Err(SchedulingError::SlotTaken {
                doctor_id,
                date,
                time,
            });
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id,
            patient_name: new.patient_name,
            doctor_id,
            doctor_name: new.doctor_name,
            date,
            time,
            reason: non_blank(new.reason).unwrap_or_else(|| DEFAULT_REASON.to_string()),
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
            updated_at: None,
        };

        appointments.push(appointment.clone());
        tracing::info!(
            appointment_id = %appointment.id,
            patient_id = %appointment.patient_id,
            doctor_id = %appointment.doctor_id,
            "Appointment booked"
        );
        Ok(appointment)
    }

    fn update_appointment(
        &self,
        id: &Uuid,
        patch: AppointmentPatch,
    ) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.write_appointments()?;
        let appointment = appointments
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| SchedulingError::appointment_not_found(id))?;
        appointment.apply(patch, Utc::now());
        tracing::debug!(appointment_id = %id, status = %appointment.status, "Appointment updated");
        Ok(appointment.clone())
    }

    fn cancel_appointment(&self, id: &Uuid) -> Result<(), SchedulingError> {
        let mut appointments = self.write_appointments()?;
        let index = appointments
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| SchedulingError::appointment_not_found(id))?;
        appointments.remove(index);
        tracing::info!(appointment_id = %id, "Appointment cancelled");
        Ok(())
    }

    fn list_test_bookings(
        &self,
        filter: &TestBookingFilter,
    ) -> Result<Vec<TestBooking>, SchedulingError> {
        Ok(self
            .read_test_bookings()?
            .iter()
            .filter(|b| test_booking_matches(b, filter))
            .cloned()
            .collect())
    }

    fn get_test_booking(&self, id: &Uuid) -> Result<TestBooking, SchedulingError> {
        self.read_test_bookings()?
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(|| SchedulingError::test_booking_not_found(id))
    }

    fn book_test(&self, new: NewTestBooking) -> Result<TestBooking, SchedulingError> {
        let mut required = RequiredFields::default();
        let patient_id = required.take("patientId", new.patient_id);
        let test_id = required.take("testId", new.test_id);
        let date = required.take("date", new.date);
        let time = required.take("time", new.time);
        required.finish()?;

        let test = self
            .lab_catalog
            .get(&test_id)
            .ok_or_else(|| SchedulingError::lab_test_not_found(&test_id))?;

        let booking = TestBooking {
            id: Uuid::new_v4(),
            patient_id,
            patient_name: new.patient_name,
            test_id,
            test_name: test.name.to_string(),
            test_category: test.category.to_string(),
            price: test.price,
            date,
            time,
            address: non_blank(new.address).unwrap_or_default(),
            home_collection: new.home_collection.unwrap_or(false),
            status: AppointmentStatus::Scheduled,
            report_url: None,
            created_at: Utc::now(),
            updated_at: None,
        };

        self.write_test_bookings()?.push(booking.clone());
        tracing::info!(
            booking_id = %booking.id,
            patient_id = %booking.patient_id,
            test_id = %booking.test_id,
            "Lab test booked"
        );
        Ok(booking)
    }

    fn update_test_booking(
        &self,
        id: &Uuid,
        patch: TestBookingPatch,
    ) -> Result<TestBooking, SchedulingError> {
        let mut bookings = self.write_test_bookings()?;
        let booking = bookings
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(|| SchedulingError::test_booking_not_found(id))?;
        booking.apply(patch, Utc::now());
        tracing::debug!(booking_id = %id, status = %booking.status, "Test booking updated");
        Ok(booking.clone())
    }

    fn cancel_test_booking(&self, id: &Uuid) -> Result<(), SchedulingError> {
        let mut bookings = self.write_test_bookings()?;
        let index = bookings
            .iter()
            .position(|b| &b.id == id)
            .ok_or_else(|| SchedulingError::test_booking_not_found(id))?;
        bookings.remove(index);
        tracing::info!(booking_id = %id, "Test booking cancelled");
        Ok(())
    }
}
