//! Appointment operations.

use super::ClinicalStore;
use crate::models::{Appointment, RecordId};
use crate::storage::StorageResult;

impl ClinicalStore {
    /// List all appointments in stored order.
    pub fn list_appointments(&self) -> Vec<Appointment> {
        self.load()
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: &RecordId) -> Option<Appointment> {
        self.find(id)
    }

    /// List appointments booked for a patient.
    pub fn list_appointments_for_patient(&self, patient_id: &RecordId) -> Vec<Appointment> {
        self.for_patient(patient_id)
    }

    /// Add an appointment under the next free id.
    ///
    /// A blank `patient_name` is filled from the patient record.
    pub fn add_appointment(&self, mut appointment: Appointment) -> StorageResult<Appointment> {
        self.fill_patient_name(&mut appointment);
        self.insert(appointment)
    }

    /// Replace an appointment wholesale; `None` if the id is unknown.
    pub fn update_appointment(&self, appointment: Appointment) -> StorageResult<Option<Appointment>> {
        self.replace(appointment)
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: &RecordId) -> StorageResult<bool> {
        self.remove::<Appointment>(id)
    }

    /// Appointments whose patient no longer exists.
    pub fn orphaned_appointments(&self) -> Vec<Appointment> {
        self.orphans()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedPolicy;
    use crate::models::AppointmentStatus;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn setup_store() -> ClinicalStore {
        let store = ClinicalStore::new(Arc::new(MemoryStorage::new()));
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        store.initialize_at(SeedPolicy::Always, today).unwrap();
        store
    }

    #[test]
    fn test_add_fills_patient_name() {
        let store = setup_store();
        let added = store
            .add_appointment(Appointment::new(3, "2026-04-01", "08:30", "Teeth Cleaning"))
            .unwrap();

        assert_eq!(added.id, RecordId::Number(7));
        assert_eq!(added.patient_name, "Robert Johnson");
        assert_eq!(store.get_appointment(&added.id), Some(added));
    }

    #[test]
    fn test_add_keeps_given_patient_name() {
        let store = setup_store();
        let mut appt = Appointment::new(3, "2026-04-01", "08:30", "Teeth Cleaning");
        appt.patient_name = "Bob Johnson".into();

        let added = store.add_appointment(appt).unwrap();
        assert_eq!(added.patient_name, "Bob Johnson");
    }

    #[test]
    fn test_add_for_unknown_patient() {
        let store = setup_store();
        let added = store
            .add_appointment(Appointment::new(99, "2026-04-01", "08:30", "Fillings"))
            .unwrap();
        assert_eq!(added.patient_name, "");
        assert_eq!(store.orphaned_appointments(), vec![added]);
    }

    #[test]
    fn test_list_for_patient() {
        let store = setup_store();
        let jane = store.list_appointments_for_patient(&RecordId::Number(2));
        let ids: Vec<RecordId> = jane.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![RecordId::Number(2), RecordId::Number(6)]);
    }

    #[test]
    fn test_update_replaces_wholesale() {
        let store = setup_store();
        let mut appt = store.get_appointment(&RecordId::Number(4)).unwrap();
        appt.status = AppointmentStatus::Confirmed;
        appt.room = None;

        let updated = store.update_appointment(appt.clone()).unwrap();
        assert_eq!(updated, Some(appt.clone()));
        assert_eq!(store.get_appointment(&RecordId::Number(4)), Some(appt));
    }

    #[test]
    fn test_update_missing() {
        let store = setup_store();
        let mut appt = Appointment::new(1, "2026-04-01", "08:30", "Fillings");
        appt.id = RecordId::Number(77);

        assert_eq!(store.update_appointment(appt).unwrap(), None);
        assert_eq!(store.list_appointments().len(), 6);
    }

    #[test]
    fn test_delete_unknown_id() {
        let store = setup_store();
        assert!(!store.delete_appointment(&RecordId::Number(77)).unwrap());
        assert_eq!(store.list_appointments().len(), 6);
    }

    #[test]
    fn test_legacy_timestamp_ids() {
        let store = setup_store();
        let mut appt = store.get_appointment(&RecordId::Number(1)).unwrap();
        appt.id = RecordId::Text("1720000000000".into());
        store.delete_appointment(&RecordId::Number(1)).unwrap();

        // Simulate a legacy write by appending directly
        let mut all = store.list_appointments();
        all.push(appt);
        store.save(&all).unwrap();

        assert!(store.get_appointment(&RecordId::Number(1720000000000)).is_some());

        let added = store
            .add_appointment(Appointment::new(1, "2026-04-01", "08:30", "Fillings"))
            .unwrap();
        assert_eq!(added.id, RecordId::Number(1720000000001));
    }
}
