//! Summary figures for the dashboard.
//!
//! All figures are computed from already-filtered records, so a patient
//! session only ever aggregates its own data.

use std::collections::HashSet;

use chrono::{Days, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::access::VisibleRecords;
use crate::config::UNKNOWN_PATIENT_NAME;
use crate::models::{Appointment, AppointmentStatus, Patient, RecordId};

/// Reporting window ending today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// First day of the window that ends on `today`.
    pub fn start(self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            TimeRange::Week => today.checked_sub_days(Days::new(7)),
            TimeRange::Month => today.checked_sub_months(Months::new(1)),
            TimeRange::Year => today.checked_sub_months(Months::new(12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            "year" => Some(TimeRange::Year),
            _ => None,
        }
    }
}

/// Headline numbers for one reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_patients: usize,
    /// Distinct patients with an appointment inside the window
    pub active_patients: usize,
    /// Appointments dated after today
    pub upcoming_appointments: usize,
    /// Treatment cost billed inside the window
    pub revenue: f64,
    /// Paid treatments inside the window
    pub completed_treatments: usize,
    /// Treatments not yet paid, any date
    pub pending_treatments: usize,
    /// Share of appointments confirmed, as a rounded percentage
    pub confirmation_rate: u32,
}

impl DashboardStats {
    pub fn compute(visible: &VisibleRecords, range: TimeRange, today: NaiveDate) -> Self {
        let start = range.start(today).format("%Y-%m-%d").to_string();
        let end = today.format("%Y-%m-%d").to_string();
        let in_range = |date: &str| date >= start.as_str() && date <= end.as_str();

        let active_patients: HashSet<&RecordId> = visible
            .appointments
            .iter()
            .filter(|a| in_range(a.date.as_str()))
            .map(|a| &a.patient_id)
            .collect();

        let upcoming_appointments = visible
            .appointments
            .iter()
            .filter(|a| a.date.as_str() > end.as_str())
            .count();

        let revenue: f64 = visible
            .treatments
            .iter()
            .filter(|t| in_range(t.date.as_str()))
            .map(|t| t.cost)
            .sum();

        let completed_treatments = visible
            .treatments
            .iter()
            .filter(|t| in_range(t.date.as_str()) && t.payment_status.is_settled())
            .count();

        let pending_treatments = visible
            .treatments
            .iter()
            .filter(|t| !t.payment_status.is_settled())
            .count();

        Self {
            total_patients: visible.patients.len(),
            active_patients: active_patients.len(),
            upcoming_appointments,
            revenue,
            completed_treatments,
            pending_treatments,
            confirmation_rate: confirmation_rate(&visible.appointments),
        }
    }
}

/// Percentage of appointments with status Confirmed (0 when empty).
pub fn confirmation_rate(appointments: &[Appointment]) -> u32 {
    if appointments.is_empty() {
        return 0;
    }
    let confirmed = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Confirmed)
        .count();
    ((confirmed as f64 / appointments.len() as f64) * 100.0).round() as u32
}

/// The next `limit` appointments starting after `now`, soonest first.
///
/// Appointments with an unparseable date or time are skipped.
pub fn upcoming_appointments(
    appointments: &[Appointment],
    now: NaiveDateTime,
    limit: usize,
) -> Vec<Appointment> {
    let mut upcoming: Vec<(NaiveDateTime, &Appointment)> = appointments
        .iter()
        .filter_map(|a| a.starts_at().map(|start| (start, a)))
        .filter(|(start, _)| *start > now)
        .collect();
    upcoming.sort_by_key(|(start, _)| *start);

    upcoming
        .into_iter()
        .take(limit)
        .map(|(_, a)| a.clone())
        .collect()
}

/// A patient ranked by number of appointments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientVisitCount {
    pub patient_id: RecordId,
    pub name: String,
    pub appointments: usize,
}

/// Patients with the most appointments, busiest first.
///
/// Ties keep the order in which patients first appear.
pub fn top_patients(
    patients: &[Patient],
    appointments: &[Appointment],
    limit: usize,
) -> Vec<PatientVisitCount> {
    let mut counts: Vec<(RecordId, usize)> = Vec::new();
    for appt in appointments {
        match counts.iter_mut().find(|(id, _)| id == &appt.patient_id) {
            Some((_, n)) => *n += 1,
            None => counts.push((appt.patient_id.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(limit)
        .map(|(patient_id, n)| PatientVisitCount {
            name: patients
                .iter()
                .find(|p| p.id == patient_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PATIENT_NAME.to_string()),
            patient_id,
            appointments: n,
        })
        .collect()
}
