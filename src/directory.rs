//! Doctor directory: static catalog with case-insensitive lookups.
//!
//! Appointments reference doctors by id only; nothing checks that the
//! id exists here.

use crate::models::{Doctor, DoctorFilter};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

static DOCTORS: [Doctor; 4] = [
    Doctor {
        id: "1",
        name: "Dr. Priya Sharma",
        specialty: "Cardiologist",
        qualification: "MBBS, MD (Cardiology)",
        experience: 15,
        fee: 800,
        hospital: "Apollo Hospital",
        availability: &["Monday", "Wednesday", "Friday"],
        timings: "10:00 AM - 5:00 PM",
        rating: 4.8,
        image: PLACEHOLDER_IMAGE,
    },
    Doctor {
        id: "2",
        name: "Dr. Rajesh Kumar",
        specialty: "Orthopedic",
        qualification: "MBBS, MS (Ortho)",
        experience: 12,
        fee: 700,
        hospital: "Fortis Hospital",
        availability: &["Tuesday", "Thursday", "Saturday"],
        timings: "9:00 AM - 4:00 PM",
        rating: 4.6,
        image: PLACEHOLDER_IMAGE,
    },
    Doctor {
        id: "3",
        name: "Dr. Anjali Verma",
        specialty: "Pediatrician",
        qualification: "MBBS, MD (Pediatrics)",
        experience: 10,
        fee: 600,
        hospital: "Max Healthcare",
        availability: &["Monday", "Tuesday", "Thursday"],
        timings: "11:00 AM - 6:00 PM",
        rating: 4.9,
        image: PLACEHOLDER_IMAGE,
    },
    Doctor {
        id: "4",
        name: "Dr. Amit Patel",
        specialty: "General Physician",
        qualification: "MBBS, MD",
        experience: 20,
        fee: 500,
        hospital: "Manipal Hospital",
        availability: &["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"],
        timings: "8:00 AM - 2:00 PM",
        rating: 4.7,
        image: PLACEHOLDER_IMAGE,
    },
];

/// Read-only view over a doctor catalog.
#[derive(Debug, Clone, Copy)]
pub struct DoctorDirectory {
    doctors: &'static [Doctor],
}

impl Default for DoctorDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl DoctorDirectory {
    pub fn builtin() -> Self {
        Self { doctors: &DOCTORS }
    }

    /// Doctors whose specialty and hospital contain the supplied filters.
    pub fn list(&self, filter: &DoctorFilter) -> Vec<Doctor> {
        self.doctors
            .iter()
            .filter(|d| {
                filter
                    .specialty
                    .as_deref()
                    .map_or(true, |s| contains_ignore_case(d.specialty, s))
            })
            .filter(|d| {
                filter
                    .hospital
                    .as_deref()
                    .map_or(true, |h| contains_ignore_case(d.hospital, h))
            })
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<Doctor> {
        self.doctors.iter().find(|d| d.id == id).cloned()
    }

    /// Distinct specialties in catalog order.
    pub fn specialties(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for doctor in self.doctors {
            if !seen.contains(&doctor.specialty) {
                seen.push(doctor.specialty);
            }
        }
        seen
    }
}
