//! Patient models.

use serde::{Deserialize, Serialize};

use super::{Record, RecordId};
use crate::config::PATIENTS_KEY;

/// Patient gender as recorded at intake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// Medical background kept alongside the contact record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthInfo {
    pub allergies: String,
    pub medical_history: String,
    pub current_medications: String,
    pub emergency_contact: String,
    pub blood_type: String,
    pub notes: String,
}

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    #[serde(deserialize_with = "super::lenient::u32_from_any")]
    pub age: u32,
    pub gender: Gender,
    /// Phone number
    pub contact: String,
    pub email: String,
    pub address: String,
    /// ISO date, empty if never seen
    pub last_visit: String,
    /// ISO date, empty if none booked
    pub next_appointment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_info: Option<HealthInfo>,
}

impl Patient {
    /// Create an unsaved patient with required fields.
    pub fn new(name: impl Into<String>, age: u32, gender: Gender) -> Self {
        Self {
            id: RecordId::unassigned(),
            name: name.into(),
            age,
            gender,
            contact: String::new(),
            email: String::new(),
            address: String::new(),
            last_visit: String::new(),
            next_appointment: String::new(),
            health_info: None,
        }
    }

    /// Whether `name` identifies this patient (case-insensitive, trimmed).
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }
}

impl Record for Patient {
    const STORAGE_KEY: &'static str = PATIENTS_KEY;
    const KIND: &'static str = "patient";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}
