//! Patient operations.

use super::ClinicalStore;
use crate::models::{Appointment, Patient, Record, RecordId, Treatment};
use crate::storage::StorageResult;

/// Records removed by a cascading patient delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub patient_removed: bool,
    pub appointments_removed: usize,
    pub treatments_removed: usize,
}

impl ClinicalStore {
    /// List all patients in stored order.
    pub fn list_patients(&self) -> Vec<Patient> {
        self.load()
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: &RecordId) -> Option<Patient> {
        self.find(id)
    }

    /// Add a patient under the next free id.
    pub fn add_patient(&self, patient: Patient) -> StorageResult<Patient> {
        self.insert(patient)
    }

    /// Replace a patient wholesale.
    ///
    /// If the name changed, the `patientName` snapshot on the patient's
    /// appointments and treatments is rewritten to match. Returns `None`
    /// (and writes nothing) if no patient has this id.
    pub fn update_patient(&self, patient: Patient) -> StorageResult<Option<Patient>> {
        let previous_name = self.get_patient(&patient.id).map(|p| p.name);

        let Some(updated) = self.replace(patient)? else {
            return Ok(None);
        };

        if previous_name.as_deref() != Some(updated.name.as_str()) {
            self.sync_patient_name(&updated.id)?;
        }
        Ok(Some(updated))
    }

    /// Rewrite `patientName` on every appointment and treatment of a patient.
    ///
    /// Returns the number of records changed.
    pub fn sync_patient_name(&self, patient_id: &RecordId) -> StorageResult<usize> {
        let Some(patient) = self.get_patient(patient_id) else {
            return Ok(0);
        };

        let appointments = self.rename_owner::<Appointment>(patient_id, &patient.name)?;
        let treatments = self.rename_owner::<Treatment>(patient_id, &patient.name)?;
        Ok(appointments + treatments)
    }

    /// Delete a patient.
    ///
    /// Appointments and treatments that reference the patient are left in
    /// place; use [`ClinicalStore::delete_patient_cascade`] to remove them too.
    pub fn delete_patient(&self, id: &RecordId) -> StorageResult<bool> {
        self.remove::<Patient>(id)
    }

    /// Delete a patient together with their appointments and treatments.
    ///
    /// All three collections are filtered in memory first and then written
    /// as one batch; if any write fails the earlier ones are rolled back.
    pub fn delete_patient_cascade(&self, id: &RecordId) -> StorageResult<CascadeSummary> {
        let mut patients = self.load_for_write::<Patient>()?;
        let mut appointments = self.load_for_write::<Appointment>()?;
        let mut treatments = self.load_for_write::<Treatment>()?;
        let before = (patients.len(), appointments.len(), treatments.len());

        patients.retain(|p| &p.id != id);
        appointments.retain(|a| &a.patient_id != id);
        treatments.retain(|t| &t.patient_id != id);

        let summary = CascadeSummary {
            patient_removed: patients.len() != before.0,
            appointments_removed: before.1 - appointments.len(),
            treatments_removed: before.2 - treatments.len(),
        };

        self.commit(&[
            (Appointment::STORAGE_KEY, serde_json::to_vec(&appointments)?),
            (Treatment::STORAGE_KEY, serde_json::to_vec(&treatments)?),
            (Patient::STORAGE_KEY, serde_json::to_vec(&patients)?),
        ])?;

        tracing::info!(
            id = %id,
            appointments = summary.appointments_removed,
            treatments = summary.treatments_removed,
            "Cascade deleted patient"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SeedPolicy, PATIENTS_KEY};
    use crate::models::Gender;
    use crate::storage::{KeyValueStore, MemoryStorage, StorageError};
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn setup_store() -> ClinicalStore {
        let store = ClinicalStore::new(Arc::new(MemoryStorage::new()));
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        store.initialize_at(SeedPolicy::Always, today).unwrap();
        store
    }

    #[test]
    fn test_add_and_get() {
        let store = setup_store();

        let mut patient = Patient::new("Ada Lovelace", 36, Gender::Female);
        patient.contact = "555-0101".into();
        let added = store.add_patient(patient).unwrap();

        assert_eq!(added.id, RecordId::Number(7));
        assert_eq!(store.get_patient(&added.id), Some(added));
    }

    #[test]
    fn test_add_discards_caller_id() {
        let store = setup_store();

        let mut patient = Patient::new("Walk In", 30, Gender::Other);
        patient.id = RecordId::Number(1);
        let added = store.add_patient(patient).unwrap();

        assert_eq!(added.id, RecordId::Number(7));
        assert_eq!(store.get_patient(&RecordId::Number(1)).unwrap().name, "John Doe");
    }

    #[test]
    fn test_get_by_string_id() {
        let store = setup_store();
        let patient = store.get_patient(&RecordId::Text("2".into())).unwrap();
        assert_eq!(patient.name, "Jane Doe");
    }

    #[test]
    fn test_update_missing_returns_none() {
        let store = setup_store();
        let before = store.list_patients();

        let mut ghost = Patient::new("Ghost", 1, Gender::Other);
        ghost.id = RecordId::Number(404);
        assert_eq!(store.update_patient(ghost).unwrap(), None);
        assert_eq!(store.list_patients(), before);
    }

    #[test]
    fn test_rename_resyncs_snapshots() {
        let store = setup_store();

        let mut jane = store.get_patient(&RecordId::Number(2)).unwrap();
        jane.name = "Jane Smith".into();
        store.update_patient(jane).unwrap().unwrap();

        let appointments = store.list_appointments_for_patient(&RecordId::Number(2));
        assert_eq!(appointments.len(), 2);
        assert!(appointments.iter().all(|a| a.patient_name == "Jane Smith"));

        let treatments = store.list_treatments_for_patient(&RecordId::Number(2));
        assert!(treatments.iter().all(|t| t.patient_name == "Jane Smith"));

        // Other patients untouched
        let john = store.list_appointments_for_patient(&RecordId::Number(1));
        assert_eq!(john[0].patient_name, "John Doe");
    }

    #[test]
    fn test_delete_leaves_orphans() {
        let store = setup_store();
        assert!(store.delete_patient(&RecordId::Number(1)).unwrap());

        assert!(store.get_patient(&RecordId::Number(1)).is_none());
        assert_eq!(store.list_appointments_for_patient(&RecordId::Number(1)).len(), 1);
        assert_eq!(store.orphaned_appointments().len(), 1);
        assert_eq!(store.orphaned_treatments().len(), 1);
    }

    #[test]
    fn test_delete_cascade() {
        let store = setup_store();
        let summary = store.delete_patient_cascade(&RecordId::Number(2)).unwrap();

        assert_eq!(
            summary,
            CascadeSummary {
                patient_removed: true,
                appointments_removed: 2,
                treatments_removed: 2,
            }
        );
        assert_eq!(store.list_appointments().len(), 4);
        assert_eq!(store.list_treatments().len(), 4);
        assert!(store.orphaned_appointments().is_empty());
    }

    #[test]
    fn test_delete_keeps_order() {
        let store = setup_store();
        store.delete_patient(&RecordId::Number(3)).unwrap();

        let names: Vec<String> = store.list_patients().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["John Doe", "Jane Doe", "Emily Davis", "Michael Wilson", "Dr. John Smith"]
        );
    }

    struct FailingWrites {
        inner: MemoryStorage,
        key: &'static str,
        armed: AtomicBool,
    }

    impl KeyValueStore for FailingWrites {
        fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> StorageResult<()> {
            if self.armed.load(Ordering::SeqCst) && key == self.key {
                return Err(StorageError::Backend("disk full".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> StorageResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_delete_cascade_rolls_back_on_write_failure() {
        let storage = Arc::new(FailingWrites {
            inner: MemoryStorage::new(),
            key: PATIENTS_KEY,
            armed: AtomicBool::new(false),
        });
        let store = ClinicalStore::new(storage.clone());
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        store.initialize_at(SeedPolicy::Always, today).unwrap();

        storage.armed.store(true, Ordering::SeqCst);
        let jane = RecordId::Number(2);
        let err = store.delete_patient_cascade(&jane).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));

        assert!(store.get_patient(&jane).is_some());
        assert_eq!(store.list_appointments_for_patient(&jane).len(), 2);
        assert_eq!(store.list_treatments_for_patient(&jane).len(), 2);
        assert_eq!(store.list_appointments().len(), 6);
    }

    #[test]
    fn test_write_refuses_unreadable_collection() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClinicalStore::new(storage.clone());
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        store.initialize_at(SeedPolicy::Always, today).unwrap();

        let mut raw = storage.get(PATIENTS_KEY).unwrap().unwrap();
        raw.truncate(raw.len() - 1);
        storage.set(PATIENTS_KEY, &raw).unwrap();

        let err = store.add_patient(Patient::new("Walk In", 30, Gender::Other)).unwrap_err();
        assert!(matches!(err, StorageError::Json(_)));
        assert!(matches!(
            store.delete_patient_cascade(&RecordId::Number(1)),
            Err(StorageError::Json(_))
        ));

        // Nothing was overwritten
        assert_eq!(storage.get(PATIENTS_KEY).unwrap().unwrap(), raw);
        assert_eq!(store.list_appointments().len(), 6);
    }

    #[test]
    fn test_legacy_string_age_survives_add() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClinicalStore::new(storage.clone());
        let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        store.initialize_at(SeedPolicy::Always, today).unwrap();

        let mut patients: Vec<serde_json::Value> =
            serde_json::from_slice(&storage.get(PATIENTS_KEY).unwrap().unwrap()).unwrap();
        patients.push(serde_json::json!({
            "id": "1720000000000", "name": "Form Entry", "age": "35", "gender": "Male",
            "contact": "", "email": "", "address": "", "lastVisit": "", "nextAppointment": ""
        }));
        storage.set(PATIENTS_KEY, &serde_json::to_vec(&patients).unwrap()).unwrap();

        let added = store.add_patient(Patient::new("Walk In", 30, Gender::Other)).unwrap();
        assert_eq!(added.id, RecordId::Number(1720000000001));

        let all = store.list_patients();
        assert_eq!(all.len(), 8);
        assert_eq!(all[6].age, 35);
    }

    #[test]
    fn test_add_refuses_when_ids_exhausted() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClinicalStore::new(storage.clone());
        let mut last = Patient::new("Last Id", 40, Gender::Female);
        last.id = RecordId::Number(i64::MAX);
        storage.set(PATIENTS_KEY, &serde_json::to_vec(&vec![last]).unwrap()).unwrap();

        let err = store.add_patient(Patient::new("Walk In", 30, Gender::Other)).unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
        assert_eq!(store.list_patients().len(), 1);
    }
}
