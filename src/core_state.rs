//! Shared application state handed to every request handler.
//!
//! `CoreState` owns the scheduling repository (the only mutation path
//! for reminders, appointments and test bookings) and the read-only
//! catalogs.
//! Wrapped in `Arc` at startup.

use std::sync::Arc;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::directory::DoctorDirectory;
use crate::lab_catalog::LabCatalog;
use crate::scheduling::{InMemorySchedulingStore, SchedulingRepository};

pub struct CoreState {
    scheduling: Arc<dyn SchedulingRepository>,
    directory: DoctorDirectory,
    lab_catalog: LabCatalog,
    started_at: Instant,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreState {
    /// State backed by an empty in-memory store with default policy.
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemorySchedulingStore::new()))
    }

    /// State for a configured server.
    pub fn from_config(config: &ServerConfig) -> Self {
        let store = InMemorySchedulingStore::new().with_booking_policy(config.booking_policy);
        Self::with_repository(Arc::new(store))
    }

    /// Inject an arbitrary repository implementation.
    pub fn with_repository(scheduling: Arc<dyn SchedulingRepository>) -> Self {
        Self {
            scheduling,
            directory: DoctorDirectory::builtin(),
            lab_catalog: LabCatalog::builtin(),
            started_at: Instant::now(),
        }
    }

    pub fn scheduling(&self) -> &dyn SchedulingRepository {
        self.scheduling.as_ref()
    }

    pub fn directory(&self) -> &DoctorDirectory {
        &self.directory
    }

    pub fn lab_catalog(&self) -> &LabCatalog {
        &self.lab_catalog
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
