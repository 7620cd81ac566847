//! Patients, appointments and treatments.
//!
//! Each collection is one JSON array under its own key. Every operation
//! reads the whole array, works on it in memory and writes it back.
//! Reads treat a corrupt array as empty; writes refuse to touch it and
//! return [`StorageError::Json`](crate::storage::StorageError::Json).

mod appointments;
mod patients;
mod treatments;

pub use patients::CascadeSummary;

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::config::{SeedPolicy, UNKNOWN_PATIENT_NAME};
use crate::models::{Patient, PatientOwned, Record, RecordId};
use crate::seed;
use crate::storage::{
    read_json, try_read_json, write_json, KeyValueStore, StorageError, StorageResult,
};

/// Owns the three clinical collections.
#[derive(Clone)]
pub struct ClinicalStore {
    storage: Arc<dyn KeyValueStore>,
}

impl ClinicalStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Seed demo data dated on the current UTC day.
    pub fn initialize(&self, policy: SeedPolicy) -> StorageResult<()> {
        self.initialize_at(policy, Utc::now().date_naive())
    }

    /// Seed demo data, using `today` for the records that track the
    /// current day.
    ///
    /// [`SeedPolicy::IfAbsent`] fills only missing collections;
    /// [`SeedPolicy::Always`] overwrites all three.
    pub fn initialize_at(&self, policy: SeedPolicy, today: NaiveDate) -> StorageResult<()> {
        self.seed_collection(policy, seed::demo_patients)?;
        self.seed_collection(policy, || seed::demo_appointments(today))?;
        self.seed_collection(policy, || seed::demo_treatments(today))?;
        Ok(())
    }

    /// Discard all clinical edits and restore the demo data.
    pub fn reset_demo_data(&self) -> StorageResult<()> {
        self.initialize(SeedPolicy::Always)
    }

    fn seed_collection<T, F>(&self, policy: SeedPolicy, records: F) -> StorageResult<()>
    where
        T: Record,
        F: FnOnce() -> Vec<T>,
    {
        if policy == SeedPolicy::IfAbsent && self.storage.contains(T::STORAGE_KEY)? {
            tracing::debug!(kind = T::KIND, "Collection present, skipping seed");
            return Ok(());
        }

        let records = records();
        self.save(&records)?;
        tracing::info!(kind = T::KIND, count = records.len(), "Initialized collection");
        Ok(())
    }

    /// Name of the patient with `id`, or a placeholder if none exists.
    pub fn resolve_patient_name(&self, id: &RecordId) -> String {
        self.get_patient(id)
            .map(|p| p.name)
            .unwrap_or_else(|| UNKNOWN_PATIENT_NAME.to_string())
    }

    // =========================================================================
    // Generic collection operations
    // =========================================================================

    fn load<T: Record>(&self) -> Vec<T> {
        read_json(self.storage.as_ref(), T::STORAGE_KEY).unwrap_or_default()
    }

    /// Load a collection that is about to be rewritten.
    ///
    /// Unlike [`ClinicalStore::load`], undecodable data is an error so the
    /// write cannot replace records it failed to read.
    fn load_for_write<T: Record>(&self) -> StorageResult<Vec<T>> {
        let records = try_read_json(self.storage.as_ref(), T::STORAGE_KEY).map_err(|e| {
            tracing::warn!(kind = T::KIND, error = %e, "Refusing to rewrite unreadable collection");
            e
        })?;
        Ok(records.unwrap_or_default())
    }

    fn save<T: Record>(&self, records: &[T]) -> StorageResult<()> {
        write_json(self.storage.as_ref(), T::STORAGE_KEY, records)
    }

    fn find<T: Record>(&self, id: &RecordId) -> Option<T> {
        self.load::<T>().into_iter().find(|r| r.id() == id)
    }

    /// Assign the next id, append and persist.
    fn insert<T: Record>(&self, mut record: T) -> StorageResult<T> {
        let mut records = self.load_for_write::<T>()?;
        let id = RecordId::next_after(records.iter().map(Record::id)).ok_or_else(|| {
            StorageError::Backend(format!("{} id space exhausted", T::KIND))
        })?;
        record.set_id(id);
        records.push(record.clone());
        self.save(&records)?;

        tracing::debug!(kind = T::KIND, id = %record.id(), "Added record");
        Ok(record)
    }

    /// Replace the record with the same id wholesale.
    fn replace<T: Record>(&self, record: T) -> StorageResult<Option<T>> {
        let mut records = self.load_for_write::<T>()?;
        let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
            tracing::debug!(kind = T::KIND, id = %record.id(), "Update target not found");
            return Ok(None);
        };

        *slot = record.clone();
        self.save(&records)?;

        tracing::debug!(kind = T::KIND, id = %record.id(), "Updated record");
        Ok(Some(record))
    }

    /// Remove the record with `id`, keeping the order of the rest.
    fn remove<T: Record>(&self, id: &RecordId) -> StorageResult<bool> {
        let mut records = self.load_for_write::<T>()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        let removed = records.len() != before;
        self.save(&records)?;

        tracing::info!(kind = T::KIND, id = %id, removed, "Deleted record");
        Ok(removed)
    }

    fn for_patient<T: PatientOwned>(&self, patient_id: &RecordId) -> Vec<T> {
        self.load::<T>()
            .into_iter()
            .filter(|r| r.patient_id() == patient_id)
            .collect()
    }

    /// Copy `name` onto every record owned by `patient_id`.
    ///
    /// Returns how many records changed; writes only if any did.
    fn rename_owner<T: PatientOwned>(&self, patient_id: &RecordId, name: &str) -> StorageResult<usize> {
        let mut records = self.load_for_write::<T>()?;
        let mut changed = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.patient_id() == patient_id && r.patient_name() != name)
        {
            record.set_patient_name(name);
            changed += 1;
        }

        if changed > 0 {
            self.save(&records)?;
            tracing::debug!(kind = T::KIND, patient_id = %patient_id, changed, "Synced patient name");
        }
        Ok(changed)
    }

    /// Write several encoded collections as one batch.
    ///
    /// If a write fails, the keys already written get their previous
    /// values back before the error is returned.
    fn commit(&self, batch: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let mut written: Vec<(&str, Option<Vec<u8>>)> = Vec::with_capacity(batch.len());
        for (key, bytes) in batch {
            let previous = self.storage.get(key)?;
            if let Err(e) = self.storage.set(key, bytes) {
                tracing::warn!(key = *key, error = %e, "Batch write failed, rolling back");
                self.roll_back(&written);
                return Err(e);
            }
            written.push((*key, previous));
        }
        Ok(())
    }

    fn roll_back(&self, written: &[(&str, Option<Vec<u8>>)]) {
        for (key, previous) in written.iter().rev() {
            let restored = match previous {
                Some(bytes) => self.storage.set(key, bytes),
                None => self.storage.remove(key),
            };
            if let Err(e) = restored {
                tracing::error!(key = *key, error = %e, "Rollback failed");
            }
        }
    }

    /// Records whose patient no longer exists.
    fn orphans<T: PatientOwned>(&self) -> Vec<T> {
        let patients = self.load::<Patient>();
        self.load::<T>()
            .into_iter()
            .filter(|r| !patients.iter().any(|p| &p.id == r.patient_id()))
            .collect()
    }

    /// Fill a missing patient name from the patient record.
    fn fill_patient_name<T: PatientOwned>(&self, record: &mut T) {
        if record.patient_name().trim().is_empty() {
            if let Some(patient) = self.get_patient(record.patient_id()) {
                record.set_patient_name(&patient.name);
            }
        }
    }
}
