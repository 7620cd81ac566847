//! Treatment record operations.

use super::ClinicalStore;
use crate::models::{Attachment, RecordId, Treatment};
use crate::storage::StorageResult;

impl ClinicalStore {
    /// List all treatments in stored order.
    pub fn list_treatments(&self) -> Vec<Treatment> {
        self.load()
    }

    /// Get a treatment by id.
    pub fn get_treatment(&self, id: &RecordId) -> Option<Treatment> {
        self.find(id)
    }

    /// List treatments recorded for a patient.
    pub fn list_treatments_for_patient(&self, patient_id: &RecordId) -> Vec<Treatment> {
        self.for_patient(patient_id)
    }

    /// Add a treatment under the next free id.
    ///
    /// A blank `patient_name` is filled from the patient record.
    pub fn add_treatment(&self, mut treatment: Treatment) -> StorageResult<Treatment> {
        self.fill_patient_name(&mut treatment);
        self.insert(treatment)
    }

    /// Replace a treatment wholesale; `None` if the id is unknown.
    pub fn update_treatment(&self, treatment: Treatment) -> StorageResult<Option<Treatment>> {
        self.replace(treatment)
    }

    /// Delete a treatment and its attachments.
    pub fn delete_treatment(&self, id: &RecordId) -> StorageResult<bool> {
        self.remove::<Treatment>(id)
    }

    /// Treatments whose patient no longer exists.
    pub fn orphaned_treatments(&self) -> Vec<Treatment> {
        self.orphans()
    }

    /// Append an attachment to a treatment.
    ///
    /// Returns the updated treatment, or `None` if it does not exist.
    pub fn add_treatment_attachment(
        &self,
        treatment_id: &RecordId,
        attachment: Attachment,
    ) -> StorageResult<Option<Treatment>> {
        let Some(mut treatment) = self.get_treatment(treatment_id) else {
            return Ok(None);
        };

        tracing::debug!(id = %treatment_id, name = %attachment.name, "Attaching file");
        treatment.attachments.push(attachment);
        self.replace(treatment)
    }

    /// Remove the attachment at `index` from a treatment.
    ///
    /// Returns the removed attachment, or `None` if the treatment or the
    /// index does not exist.
    pub fn remove_treatment_attachment(
        &self,
        treatment_id: &RecordId,
        index: usize,
    ) -> StorageResult<Option<Attachment>> {
        let Some(mut treatment) = self.get_treatment(treatment_id) else {
            return Ok(None);
        };
        if index >= treatment.attachments.len() {
            return Ok(None);
        }

        let removed = treatment.attachments.remove(index);
        self.replace(treatment)?;
        tracing::debug!(id = %treatment_id, name = %removed.name, "Removed attachment");
        Ok(Some(removed))
    }
}
