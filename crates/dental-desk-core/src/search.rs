//! Free-text filtering for list views.

use crate::models::{Appointment, Patient};

/// Patients whose name contains `term` (case-insensitive) or whose
/// contact number contains it verbatim.
pub fn search_patients(patients: &[Patient], term: &str) -> Vec<Patient> {
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle) || p.contact.contains(term))
        .cloned()
        .collect()
}

/// Appointments whose patient name or treatment contains `term`
/// (case-insensitive), or whose date contains it verbatim.
pub fn search_appointments(appointments: &[Appointment], term: &str) -> Vec<Appointment> {
    let needle = term.to_lowercase();
    appointments
        .iter()
        .filter(|a| {
            a.patient_name.to_lowercase().contains(&needle)
                || a.treatment.to_lowercase().contains(&needle)
                || a.date.contains(term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn appointments() -> Vec<Appointment> {
        seed::demo_appointments(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
    }

    #[test]
    fn test_empty_term_matches_all() {
        let patients = seed::demo_patients();
        assert_eq!(search_patients(&patients, "").len(), patients.len());
    }

    #[test]
    fn test_patient_name_case_insensitive() {
        let patients = seed::demo_patients();
        let found = search_patients(&patients, "doe");
        let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Doe"]);
    }

    #[test]
    fn test_patient_contact() {
        let patients = seed::demo_patients();
        let found = search_patients(&patients, "555-90");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Robert Johnson");
    }

    #[test]
    fn test_appointment_by_treatment() {
        let found = search_appointments(&appointments(), "ROOT");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].treatment, "Root Canal");
    }

    #[test]
    fn test_appointment_by_date() {
        let found = search_appointments(&appointments(), "2026-03");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].treatment, "Emergency Checkup");
    }
}
