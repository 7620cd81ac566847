//! Domain models for the dental desk.

mod appointment;
mod lenient;
mod patient;
mod record_id;
mod treatment;
mod user;

pub use appointment::*;
pub use patient::*;
pub use record_id::*;
pub use treatment::*;
pub use user::*;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record kept in one of the clinical collections.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Storage key of the owning collection.
    const STORAGE_KEY: &'static str;
    /// Label used in logs.
    const KIND: &'static str;

    fn id(&self) -> &RecordId;
    fn set_id(&mut self, id: RecordId);
}

/// A record that points at a patient through `patientId`.
pub trait PatientOwned: Record {
    fn patient_id(&self) -> &RecordId;
    fn patient_name(&self) -> &str;
    fn set_patient_name(&mut self, name: &str);
}
