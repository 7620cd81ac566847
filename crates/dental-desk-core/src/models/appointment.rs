//! Appointment models.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{PatientOwned, Record, RecordId};
use crate::config::APPOINTMENTS_KEY;

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Pending,
    Completed,
    Cancelled,
    Rescheduled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Rescheduled => "Rescheduled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Scheduled" => Some(AppointmentStatus::Scheduled),
            "Confirmed" => Some(AppointmentStatus::Confirmed),
            "Pending" => Some(AppointmentStatus::Pending),
            "Completed" => Some(AppointmentStatus::Completed),
            "Cancelled" => Some(AppointmentStatus::Cancelled),
            "Rescheduled" => Some(AppointmentStatus::Rescheduled),
            _ => None,
        }
    }
}

/// A booked appointment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    /// Snapshot of the patient's name, re-synced on patient rename
    pub patient_name: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM)
    pub time: String,
    /// Duration in minutes
    #[serde(deserialize_with = "super::lenient::u32_from_any")]
    pub duration: u32,
    pub treatment: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "super::lenient::f64_from_any")]
    pub estimated_cost: f64,

    // Scheduling metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_interval: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_sent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reminder_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dentist_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dentist_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

impl Appointment {
    /// Create an unsaved appointment for a patient.
    pub fn new(
        patient_id: impl Into<RecordId>,
        date: impl Into<String>,
        time: impl Into<String>,
        treatment: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::unassigned(),
            patient_id: patient_id.into(),
            patient_name: String::new(),
            date: date.into(),
            time: time.into(),
            duration: 30,
            treatment: treatment.into(),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
            estimated_cost: 0.0,
            insurance_details: None,
            reason: None,
            is_recurring: None,
            recurring_interval: None,
            reminder_sent: None,
            last_reminder_date: None,
            dentist_id: None,
            dentist_name: None,
            room: None,
        }
    }

    /// Parsed appointment date, if well-formed.
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Parsed start date and time, if both are well-formed.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(self.day()?.and_time(time))
    }
}

impl Record for Appointment {
    const STORAGE_KEY: &'static str = APPOINTMENTS_KEY;
    const KIND: &'static str = "appointment";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl PatientOwned for Appointment {
    fn patient_id(&self) -> &RecordId {
        &self.patient_id
    }

    fn patient_name(&self) -> &str {
        &self.patient_name
    }

    fn set_patient_name(&mut self, name: &str) {
        self.patient_name = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_appointment_defaults() {
        let appt = Appointment::new(1, "2025-07-15", "10:00", "Regular Checkup");
        assert_eq!(appt.patient_id, RecordId::Number(1));
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.duration, 30);
    }

    #[test]
    fn test_starts_at() {
        let appt = Appointment::new(1, "2025-07-15", "10:30", "Fillings");
        let start = appt.starts_at().unwrap();
        assert_eq!(start.to_string(), "2025-07-15 10:30:00");

        let bad = Appointment::new(1, "15/07/2025", "10:30", "Fillings");
        assert!(bad.starts_at().is_none());
    }

    #[test]
    fn test_metadata_omitted_when_absent() {
        let appt = Appointment::new(1, "2025-07-15", "10:00", "Extraction");
        let json = serde_json::to_string(&appt).unwrap();
        assert!(json.contains(r#""patientId":1"#));
        assert!(json.contains(r#""estimatedCost":0.0"#));
        assert!(!json.contains("room"));
    }

    #[test]
    fn test_reads_null_metadata() {
        let json = r#"{"id":3,"patientId":3,"patientName":"Robert Johnson","date":"2025-07-10",
            "time":"14:00","duration":90,"treatment":"Root Canal","status":"Scheduled",
            "notes":"","estimatedCost":1200.0,"recurringInterval":null,"lastReminderDate":null}"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert!(appt.recurring_interval.is_none());
        assert_eq!(appt.estimated_cost, 1200.0);
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            AppointmentStatus::Scheduled,
            AppointmentStatus::Confirmed,
            AppointmentStatus::Rescheduled,
        ] {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("scheduled"), None);
    }
}
