//! Treatment record models.

use serde::{Deserialize, Serialize};

use super::{PatientOwned, Record, RecordId};
use crate::config::TREATMENTS_KEY;

/// Billing state of a treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    Pending,
    #[serde(rename = "Insurance claim submitted")]
    InsuranceClaimSubmitted,
    #[serde(rename = "Partially paid")]
    PartiallyPaid,
}

impl PaymentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::InsuranceClaimSubmitted => "Insurance claim submitted",
            PaymentStatus::PartiallyPaid => "Partially paid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Paid" => Some(PaymentStatus::Paid),
            "Pending" => Some(PaymentStatus::Pending),
            "Insurance claim submitted" => Some(PaymentStatus::InsuranceClaimSubmitted),
            "Partially paid" => Some(PaymentStatus::PartiallyPaid),
            _ => None,
        }
    }

    pub fn is_settled(self) -> bool {
        self == PaymentStatus::Paid
    }
}

/// A file embedded in a treatment record as a data URI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
    pub uploaded_at: String,
}

/// A completed (or billed) treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: RecordId,
    pub patient_id: RecordId,
    /// Snapshot of the patient's name, re-synced on patient rename
    pub patient_name: String,
    pub date: String,
    pub treatment: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "super::lenient::f64_from_any")]
    pub cost: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub next_visit_recommended: String,
    #[serde(default)]
    pub dentist_notes: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Treatment {
    /// Create an unsaved, unpaid treatment record.
    pub fn new(
        patient_id: impl Into<RecordId>,
        date: impl Into<String>,
        treatment: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            id: RecordId::unassigned(),
            patient_id: patient_id.into(),
            patient_name: String::new(),
            date: date.into(),
            treatment: treatment.into(),
            notes: String::new(),
            cost,
            payment_status: PaymentStatus::Pending,
            next_visit_recommended: String::new(),
            dentist_notes: String::new(),
            attachments: Vec::new(),
        }
    }
}

impl Record for Treatment {
    const STORAGE_KEY: &'static str = TREATMENTS_KEY;
    const KIND: &'static str = "treatment";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl PatientOwned for Treatment {
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
