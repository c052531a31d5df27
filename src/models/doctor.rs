use serde::Serialize;

/// Static doctor profile served by the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: &'static str,
    pub name: &'static str,
    pub specialty: &'static str,
    pub qualification: &'static str,
    /// Years in practice.
    pub experience: u32,
    /// Consultation fee in rupees.
    pub fee: u32,
    pub hospital: &'static str,
    pub availability: &'static [&'static str],
    pub timings: &'static str,
    pub rating: f32,
    pub image: &'static str,
}
