//! Role-based visibility of clinical records.
//!
//! Rules, checked against the current session:
//! 1. Signed out → nothing
//! 2. Admin → every record
//! 3. Patient → the Patient records whose name matches the session name
//!    (case-insensitive), plus the appointments and treatments that
//!    point at those patients
//!
//! The filter holds no data; derive it again whenever the session or the
//! collections change.

use std::collections::HashSet;

use crate::clinical::ClinicalStore;
use crate::models::{Appointment, Patient, PatientOwned, RecordId, Role, Session, Treatment};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Scope {
    Nothing,
    Everything,
    OwnRecords { name: String },
}

/// Visibility rules derived from one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessFilter {
    scope: Scope,
}

/// The slice of each collection a session may read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleRecords {
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub treatments: Vec<Treatment>,
}

impl AccessFilter {
    pub fn new(session: &Session) -> Self {
        let scope = match (session.role(), session.user.as_ref()) {
            (Some(Role::Admin), _) => Scope::Everything,
            (Some(Role::Patient), Some(user)) => Scope::OwnRecords {
                name: user.name.clone(),
            },
            _ => Scope::Nothing,
        };
        Self { scope }
    }

    /// Patients visible to the session.
    pub fn patients(&self, all: &[Patient]) -> Vec<Patient> {
        match &self.scope {
            Scope::Nothing => Vec::new(),
            Scope::Everything => all.to_vec(),
            Scope::OwnRecords { name } => {
                all.iter().filter(|p| p.name_matches(name)).cloned().collect()
            }
        }
    }

    /// Appointments visible to the session; `patients` is the full
    /// patient collection used to resolve ownership.
    pub fn appointments(&self, patients: &[Patient], all: &[Appointment]) -> Vec<Appointment> {
        self.owned(patients, all)
    }

    /// Treatments visible to the session; `patients` is the full
    /// patient collection used to resolve ownership.
    pub fn treatments(&self, patients: &[Patient], all: &[Treatment]) -> Vec<Treatment> {
        self.owned(patients, all)
    }

    fn owned<T: PatientOwned>(&self, patients: &[Patient], all: &[T]) -> Vec<T> {
        match &self.scope {
            Scope::Nothing => Vec::new(),
            Scope::Everything => all.to_vec(),
            Scope::OwnRecords { name } => {
                let ids: HashSet<RecordId> = patients
                    .iter()
                    .filter(|p| p.name_matches(name))
                    .map(|p| p.id.clone())
                    .collect();
                all.iter()
                    .filter(|r| ids.contains(r.patient_id()))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Read every collection and keep what the session may see.
    pub fn apply(&self, store: &ClinicalStore) -> VisibleRecords {
        let patients = store.list_patients();
        let appointments = self.appointments(&patients, &store.list_appointments());
        let treatments = self.treatments(&patients, &store.list_treatments());

        VisibleRecords {
            patients: self.patients(&patients),
            appointments,
            treatments,
        }
    }

    /// Whether the session may open this patient's detail view.
    pub fn can_view_patient(&self, patient: &Patient) -> bool {
        match &self.scope {
            Scope::Nothing => false,
            Scope::Everything => true,
            Scope::OwnRecords { name } => patient.name_matches(name),
        }
    }

    /// Whether the session may create, edit or delete records.
    pub fn can_edit(&self) -> bool {
        self.scope == Scope::Everything
    }
}

/// Outcome of guarding a role-restricted view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    /// Not signed in
    LoginRequired,
    /// Signed in with a role the view does not admit
    Unauthorized,
}

impl RouteAccess {
    /// Check a session against the roles a view admits.
    ///
    /// An empty `allowed` list admits any signed-in user.
    pub fn check(session: &Session, allowed: &[Role]) -> Self {
        match session.role() {
            None => RouteAccess::LoginRequired,
            Some(role) if allowed.is_empty() || allowed.contains(&role) => RouteAccess::Granted,
            Some(_) => RouteAccess::Unauthorized,
        }
    }
}
