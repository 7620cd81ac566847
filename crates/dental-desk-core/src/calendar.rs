//! Calendar grouping of appointments.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::Appointment;

/// Appointments on an exact ISO date.
pub fn appointments_on(appointments: &[Appointment], date: &str) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| a.date == date)
        .cloned()
        .collect()
}

/// Appointments in a month keyed by day of month.
///
/// Days without appointments are absent. Each day's list keeps stored
/// order; records with a malformed date are skipped.
pub fn appointments_by_day(
    appointments: &[Appointment],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<Appointment>> {
    let mut days: BTreeMap<u32, Vec<Appointment>> = BTreeMap::new();
    for appt in appointments {
        let Some(day) = appt.day() else {
            continue;
        };
        if day.year() == year && day.month() == month {
            days.entry(day.day()).or_default().push(appt.clone());
        }
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;

    fn appointments() -> Vec<Appointment> {
        seed::demo_appointments(NaiveDate::from_ymd_opt(2025, 7, 12).unwrap())
    }

    #[test]
    fn test_appointments_on() {
        let found = appointments_on(&appointments(), "2025-07-10");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].patient_name, "Robert Johnson");
        assert!(appointments_on(&appointments(), "2025-07-11").is_empty());
    }

    #[test]
    fn test_appointments_by_day() {
        let days = appointments_by_day(&appointments(), 2025, 7);
        let keys: Vec<u32> = days.keys().copied().collect();
        assert_eq!(keys, vec![5, 10, 12, 15, 20, 25]);
        assert_eq!(days[&12][0].treatment, "Emergency Checkup");

        assert!(appointments_by_day(&appointments(), 2025, 8).is_empty());
    }

    #[test]
    fn test_malformed_dates_skipped() {
        let mut appts = appointments();
        appts[0].date = "July 15".into();
        let days = appointments_by_day(&appts, 2025, 7);
        assert!(!days.contains_key(&15));
    }
}
