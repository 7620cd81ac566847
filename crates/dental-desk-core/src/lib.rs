//! Dental Desk Core Library
//!
//! Local-first record store for a small dental office: patients,
//! appointments and treatments, gated by a login role.
//!
//! # Architecture
//!
//! ```text
//!                  Host UI (views)
//!                        │
//!                  ┌─────▼──────┐
//!                  │ DentalDesk │  FFI object
//!                  └─────┬──────┘
//!            ┌───────────┼────────────┐
//!            ▼           ▼            ▼
//!        AuthStore  AccessFilter  ClinicalStore
//!            │     (session ⇒ view)    │
//!            └───────────┬────────────┘
//!                        ▼
//!              KeyValueStore (JSON per key)
//!              ├── MemoryStorage
//!              └── SqliteStorage
//! ```
//!
//! # Core Principle
//!
//! **Every read a view makes goes through the access filter.** Admins see
//! every record; patients see only the records of the patient whose name
//! matches their own; a signed-out session sees nothing.
//!
//! # Modules
//!
//! - [`storage`]: Key-value backends and JSON helpers
//! - [`models`]: Domain types (Patient, Appointment, Treatment, Session, etc.)
//! - [`auth`]: Users table, login and the persisted session
//! - [`clinical`]: CRUD over the three clinical collections
//! - [`access`]: Role-based visibility
//! - [`dashboard`], [`calendar`], [`search`]: Read-side views
//! - [`attachments`]: Data-URI encoding for treatment files

pub mod access;
pub mod attachments;
pub mod auth;
pub mod calendar;
pub mod clinical;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod search;
pub mod seed;
pub mod storage;

// Re-export commonly used types
pub use access::{AccessFilter, RouteAccess, VisibleRecords};
pub use attachments::{AttachmentError, AttachmentResult};
pub use auth::{AuthError, AuthResult, AuthStore, CredentialScheme};
pub use clinical::{CascadeSummary, ClinicalStore};
pub use config::{DeskConfig, SeedPolicy};
pub use dashboard::{DashboardStats, TimeRange};
pub use models::{
    Appointment, AppointmentStatus, Attachment, Gender, HealthInfo, Patient, PaymentStatus,
    RecordId, Role, Session, SessionUser, Treatment, User,
};
pub use storage::{KeyValueStore, MemoryStorage, SqliteStorage, StorageError, StorageResult};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::{Local, Utc};
use tracing_subscriber::EnvFilter;

use models::NewUser;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DentalDeskError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Authentication failed: {0}")]
    AuthError(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Attachment error: {0}")]
    AttachmentError(String),
}

impl From<StorageError> for DentalDeskError {
    fn from(e: StorageError) -> Self {
        DentalDeskError::StorageError(e.to_string())
    }
}

impl From<AuthError> for DentalDeskError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Storage(e) => e.into(),
            other => DentalDeskError::AuthError(other.to_string()),
        }
    }
}

impl From<AttachmentError> for DentalDeskError {
    fn from(e: AttachmentError) -> Self {
        DentalDeskError::AttachmentError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for DentalDeskError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DentalDeskError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install the global `tracing` subscriber.
///
/// `filter` takes precedence over `RUST_LOG`; later calls are no-ops.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let filter = filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(config::DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Treatment types offered when booking or recording a visit.
#[uniffi::export]
pub fn treatment_options() -> Vec<String> {
    config::TREATMENT_OPTIONS.iter().map(|t| t.to_string()).collect()
}

/// Default runtime options.
#[uniffi::export]
pub fn default_desk_config() -> FfiDeskConfig {
    DeskConfig::default().into()
}

/// Open a desk over volatile in-memory storage (for demos and testing).
#[uniffi::export]
pub fn open_in_memory(config: Option<FfiDeskConfig>) -> Result<Arc<DentalDesk>, DentalDeskError> {
    let config = config.map(DeskConfig::try_from).transpose()?.unwrap_or_default();
    let desk = DentalDesk::new(Arc::new(MemoryStorage::new()), config)?;
    Ok(Arc::new(desk))
}

/// Open or create a desk backed by the SQLite file at `path`.
#[uniffi::export]
pub fn open_sqlite(
    path: String,
    config: Option<FfiDeskConfig>,
) -> Result<Arc<DentalDesk>, DentalDeskError> {
    let config = config.map(DeskConfig::try_from).transpose()?.unwrap_or_default();
    let desk = DentalDesk::new(Arc::new(SqliteStorage::open(&path)?), config)?;
    Ok(Arc::new(desk))
}

// =========================================================================
// Main API Object
// =========================================================================

struct Stores {
    auth: AuthStore,
    clinical: ClinicalStore,
}

/// Thread-safe desk wrapper for FFI.
///
/// Reads return only what the current session may see. Writes require
/// an admin session.
#[derive(uniffi::Object)]
pub struct DentalDesk {
    stores: Arc<Mutex<Stores>>,
    config: DeskConfig,
}

impl DentalDesk {
    /// Wrap `storage` and seed it according to `config.seed_policy`.
    pub fn new(storage: Arc<dyn KeyValueStore>, config: DeskConfig) -> Result<Self, DentalDeskError> {
        let stores = Stores {
            auth: AuthStore::new(storage.clone()),
            clinical: ClinicalStore::new(storage),
        };
        stores.auth.initialize(config.seed_policy)?;
        stores.clinical.initialize(config.seed_policy)?;

        Ok(Self {
            stores: Arc::new(Mutex::new(stores)),
            config,
        })
    }

    fn require_admin(stores: &Stores) -> Result<(), DentalDeskError> {
        if !AccessFilter::new(&stores.auth.current_session()).can_edit() {
            return Err(DentalDeskError::PermissionDenied(
                "admin session required".to_string(),
            ));
        }
        Ok(())
    }

    fn visible(stores: &Stores) -> VisibleRecords {
        AccessFilter::new(&stores.auth.current_session()).apply(&stores.clinical)
    }
}

#[uniffi::export]
impl DentalDesk {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Seed whatever collections are missing.
    pub fn initialize(&self) -> Result<(), DentalDeskError> {
        let stores = self.stores.lock()?;
        stores.auth.initialize(SeedPolicy::IfAbsent)?;
        stores.clinical.initialize(SeedPolicy::IfAbsent)?;
        Ok(())
    }

    /// Discard all edits and restore the demo users and records.
    pub fn reset_demo_data(&self) -> Result<(), DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        stores.auth.initialize(SeedPolicy::Always)?;
        stores.clinical.reset_demo_data()?;
        Ok(())
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Log in; a wrong password yields a signed-out session.
    pub fn login(&self, username: String, password: String) -> Result<FfiSession, DentalDeskError> {
        let stores = self.stores.lock()?;
        Ok(stores.auth.login(&username, &password)?.into())
    }

    /// Log in through a role-specific form.
    pub fn login_as(
        &self,
        username: String,
        password: String,
        role: String,
    ) -> Result<FfiSession, DentalDeskError> {
        let role = parse_role(&role)?;
        let stores = self.stores.lock()?;
        Ok(stores.auth.login_as(&username, &password, role)?.into())
    }

    pub fn logout(&self) -> Result<FfiSession, DentalDeskError> {
        let stores = self.stores.lock()?;
        Ok(stores.auth.logout()?.into())
    }

    pub fn current_session(&self) -> Result<FfiSession, DentalDeskError> {
        let stores = self.stores.lock()?;
        Ok(stores.auth.current_session().into())
    }

    /// Register a new user. Does not log them in.
    pub fn register(
        &self,
        username: String,
        password: String,
        role: String,
        name: String,
    ) -> Result<FfiUser, DentalDeskError> {
        let role = parse_role(&role)?;
        let stores = self.stores.lock()?;
        let user = stores.auth.register(NewUser {
            username,
            password,
            role,
            name,
        })?;
        Ok(user.into())
    }

    // =========================================================================
    // Visible Records
    // =========================================================================

    pub fn visible_patients(&self) -> Result<Vec<FfiPatient>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        Ok(visible.patients.into_iter().map(|p| p.into()).collect())
    }

    pub fn visible_appointments(&self) -> Result<Vec<FfiAppointment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        Ok(visible.appointments.into_iter().map(|a| a.into()).collect())
    }

    pub fn visible_treatments(&self) -> Result<Vec<FfiTreatment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        Ok(visible.treatments.into_iter().map(|t| t.into()).collect())
    }

    /// Search visible patients by name or phone number.
    pub fn search_patients(&self, term: String) -> Result<Vec<FfiPatient>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let found = search::search_patients(&visible.patients, &term);
        Ok(found.into_iter().map(|p| p.into()).collect())
    }

    /// Search visible appointments by patient, treatment or date.
    pub fn search_appointments(&self, term: String) -> Result<Vec<FfiAppointment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let found = search::search_appointments(&visible.appointments, &term);
        Ok(found.into_iter().map(|a| a.into()).collect())
    }

    /// Visible appointments on an ISO date.
    pub fn appointments_on(&self, date: String) -> Result<Vec<FfiAppointment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let found = calendar::appointments_on(&visible.appointments, &date);
        Ok(found.into_iter().map(|a| a.into()).collect())
    }

    /// Dashboard figures over the visible records.
    ///
    /// `range` is `week`, `month` or `year`.
    pub fn dashboard_stats(&self, range: String) -> Result<FfiDashboardStats, DentalDeskError> {
        let range = TimeRange::parse(&range)
            .ok_or_else(|| DentalDeskError::InvalidInput(format!("Unknown time range: {range}")))?;
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let stats = DashboardStats::compute(&visible, range, Utc::now().date_naive());
        Ok(stats.into())
    }

    /// Visible appointments in a month, one entry per day that has any.
    pub fn appointments_by_day(
        &self,
        year: i32,
        month: u32,
    ) -> Result<Vec<FfiCalendarDay>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let days = calendar::appointments_by_day(&visible.appointments, year, month);
        Ok(days
            .into_iter()
            .map(|(day, appointments)| FfiCalendarDay {
                day,
                appointments: appointments.into_iter().map(|a| a.into()).collect(),
            })
            .collect())
    }

    /// The next `limit` visible appointments after the current local time.
    pub fn upcoming_appointments(&self, limit: u32) -> Result<Vec<FfiAppointment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let upcoming = dashboard::upcoming_appointments(
            &visible.appointments,
            Local::now().naive_local(),
            limit as usize,
        );
        Ok(upcoming.into_iter().map(|a| a.into()).collect())
    }

    /// Visible patients with the most visible appointments.
    pub fn top_patients(&self, limit: u32) -> Result<Vec<FfiPatientVisitCount>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let visible = Self::visible(&stores);
        let top = dashboard::top_patients(&visible.patients, &visible.appointments, limit as usize);
        Ok(top.into_iter().map(|t| t.into()).collect())
    }

    // =========================================================================
    // Patient Operations
    // =========================================================================

    /// Get a patient by id, if the session may see it.
    pub fn get_patient(&self, id: String) -> Result<Option<FfiPatient>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let filter = AccessFilter::new(&stores.auth.current_session());
        let patient = stores
            .clinical
            .get_patient(&RecordId::from(id))
            .filter(|p| filter.can_view_patient(p));
        Ok(patient.map(|p| p.into()))
    }

    pub fn add_patient(&self, patient: FfiPatient) -> Result<FfiPatient, DentalDeskError> {
        let patient = Patient::try_from(patient)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.add_patient(patient)?.into())
    }

    pub fn update_patient(&self, patient: FfiPatient) -> Result<Option<FfiPatient>, DentalDeskError> {
        let patient = Patient::try_from(patient)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.update_patient(patient)?.map(|p| p.into()))
    }

    /// Delete a patient, leaving their appointments and treatments.
    pub fn delete_patient(&self, id: String) -> Result<bool, DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.delete_patient(&RecordId::from(id))?)
    }

    /// Delete a patient together with their appointments and treatments.
    pub fn delete_patient_cascade(&self, id: String) -> Result<FfiCascadeSummary, DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.delete_patient_cascade(&RecordId::from(id))?.into())
    }

    // =========================================================================
    // Appointment Operations
    // =========================================================================

    /// Get an appointment by id, if the session may see it.
    pub fn get_appointment(&self, id: String) -> Result<Option<FfiAppointment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let Some(appointment) = stores.clinical.get_appointment(&RecordId::from(id)) else {
            return Ok(None);
        };
        let filter = AccessFilter::new(&stores.auth.current_session());
        let visible = filter.appointments(&stores.clinical.list_patients(), &[appointment]);
        Ok(visible.into_iter().next().map(|a| a.into()))
    }

    pub fn add_appointment(&self, appointment: FfiAppointment) -> Result<FfiAppointment, DentalDeskError> {
        let appointment = Appointment::try_from(appointment)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.add_appointment(appointment)?.into())
    }

    pub fn update_appointment(
        &self,
        appointment: FfiAppointment,
    ) -> Result<Option<FfiAppointment>, DentalDeskError> {
        let appointment = Appointment::try_from(appointment)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.update_appointment(appointment)?.map(|a| a.into()))
    }

    pub fn delete_appointment(&self, id: String) -> Result<bool, DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.delete_appointment(&RecordId::from(id))?)
    }

    // =========================================================================
    // Treatment Operations
    // =========================================================================

    /// Get a treatment by id, if the session may see it.
    pub fn get_treatment(&self, id: String) -> Result<Option<FfiTreatment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        let Some(treatment) = stores.clinical.get_treatment(&RecordId::from(id)) else {
            return Ok(None);
        };
        let filter = AccessFilter::new(&stores.auth.current_session());
        let visible = filter.treatments(&stores.clinical.list_patients(), &[treatment]);
        Ok(visible.into_iter().next().map(|t| t.into()))
    }

    pub fn add_treatment(&self, treatment: FfiTreatment) -> Result<FfiTreatment, DentalDeskError> {
        let treatment = Treatment::try_from(treatment)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.add_treatment(treatment)?.into())
    }

    pub fn update_treatment(&self, treatment: FfiTreatment) -> Result<Option<FfiTreatment>, DentalDeskError> {
        let treatment = Treatment::try_from(treatment)?;
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.update_treatment(treatment)?.map(|t| t.into()))
    }

    pub fn delete_treatment(&self, id: String) -> Result<bool, DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        Ok(stores.clinical.delete_treatment(&RecordId::from(id))?)
    }

    /// Attach a file to a treatment, dated today.
    ///
    /// Files over the configured size limit are rejected.
    pub fn attach_file(
        &self,
        treatment_id: String,
        name: String,
        mime_type: String,
        bytes: Vec<u8>,
    ) -> Result<Option<FfiTreatment>, DentalDeskError> {
        let uploaded_at = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let attachment = Attachment::from_bytes(
            name,
            mime_type,
            &bytes,
            uploaded_at,
            self.config.max_attachment_bytes,
        )?;

        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        let updated = stores
            .clinical
            .add_treatment_attachment(&RecordId::from(treatment_id), attachment)?;
        Ok(updated.map(|t| t.into()))
    }

    pub fn remove_attachment(
        &self,
        treatment_id: String,
        index: u32,
    ) -> Result<Option<FfiAttachment>, DentalDeskError> {
        let stores = self.stores.lock()?;
        Self::require_admin(&stores)?;
        let removed = stores
            .clinical
            .remove_treatment_attachment(&RecordId::from(treatment_id), index as usize)?;
        Ok(removed.map(|a| a.into()))
    }
}

fn parse_role(role: &str) -> Result<Role, DentalDeskError> {
    Role::parse(role).ok_or_else(|| DentalDeskError::InvalidInput(format!("Unknown role: {role}")))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe runtime options.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDeskConfig {
    /// `if_absent` or `always`
    pub seed_policy: String,
    pub max_attachment_bytes: u64,
}

impl From<DeskConfig> for FfiDeskConfig {
    fn from(config: DeskConfig) -> Self {
        Self {
            seed_policy: config.seed_policy.as_str().to_string(),
            max_attachment_bytes: config.max_attachment_bytes as u64,
        }
    }
}

impl TryFrom<FfiDeskConfig> for DeskConfig {
    type Error = DentalDeskError;

    fn try_from(config: FfiDeskConfig) -> Result<Self, Self::Error> {
        let seed_policy = SeedPolicy::parse(&config.seed_policy).ok_or_else(|| {
            DentalDeskError::InvalidInput(format!("Unknown seed policy: {}", config.seed_policy))
        })?;
        Ok(DeskConfig {
            seed_policy,
            max_attachment_bytes: usize::try_from(config.max_attachment_bytes)
                .unwrap_or(usize::MAX),
        })
    }
}

/// FFI-safe user (no password).
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiUser {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub name: String,
}

impl From<SessionUser> for FfiUser {
    fn from(user: SessionUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.as_str().to_string(),
            name: user.name,
        }
    }
}

impl From<User> for FfiUser {
    fn from(user: User) -> Self {
        SessionUser::from(&user).into()
    }
}

/// FFI-safe session.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSession {
    pub is_authenticated: bool,
    pub user: Option<FfiUser>,
}

impl From<Session> for FfiSession {
    fn from(session: Session) -> Self {
        Self {
            is_authenticated: session.is_authenticated,
            user: session.user.map(|u| u.into()),
        }
    }
}

/// FFI-safe health info.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHealthInfo {
    pub allergies: String,
    pub medical_history: String,
    pub current_medications: String,
    pub emergency_contact: String,
    pub blood_type: String,
    pub notes: String,
}

impl From<HealthInfo> for FfiHealthInfo {
    fn from(info: HealthInfo) -> Self {
        Self {
            allergies: info.allergies,
            medical_history: info.medical_history,
            current_medications: info.current_medications,
            emergency_contact: info.emergency_contact,
            blood_type: info.blood_type,
            notes: info.notes,
        }
    }
}

impl From<FfiHealthInfo> for HealthInfo {
    fn from(info: FfiHealthInfo) -> Self {
        HealthInfo {
            allergies: info.allergies,
            medical_history: info.medical_history,
            current_medications: info.current_medications,
            emergency_contact: info.emergency_contact,
            blood_type: info.blood_type,
            notes: info.notes,
        }
    }
}

/// FFI-safe patient.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    /// Ignored on add
    pub id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub last_visit: String,
    pub next_appointment: String,
    pub health_info: Option<FfiHealthInfo>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id.key(),
            name: patient.name,
            age: patient.age,
            gender: patient.gender.as_str().to_string(),
            contact: patient.contact,
            email: patient.email,
            address: patient.address,
            last_visit: patient.last_visit,
            next_appointment: patient.next_appointment,
            health_info: patient.health_info.map(|h| h.into()),
        }
    }
}

impl TryFrom<FfiPatient> for Patient {
    type Error = DentalDeskError;

    fn try_from(patient: FfiPatient) -> Result<Self, Self::Error> {
        let gender = Gender::parse(&patient.gender).ok_or_else(|| {
            DentalDeskError::InvalidInput(format!("Unknown gender: {}", patient.gender))
        })?;
        Ok(Patient {
            id: RecordId::from(patient.id),
            name: patient.name,
            age: patient.age,
            gender,
            contact: patient.contact,
            email: patient.email,
            address: patient.address,
            last_visit: patient.last_visit,
            next_appointment: patient.next_appointment,
            health_info: patient.health_info.map(|h| h.into()),
        })
    }
}

/// FFI-safe appointment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAppointment {
    /// Ignored on add
    pub id: String,
    pub patient_id: String,
    /// Filled from the patient record when blank on add
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub treatment: String,
    pub status: String,
    pub notes: String,
    pub estimated_cost: f64,
    pub insurance_details: Option<String>,
    pub reason: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurring_interval: Option<String>,
    pub reminder_sent: Option<bool>,
    pub last_reminder_date: Option<String>,
    pub dentist_id: Option<i64>,
    pub dentist_name: Option<String>,
    pub room: Option<String>,
}

impl From<Appointment> for FfiAppointment {
    fn from(appt: Appointment) -> Self {
        Self {
            id: appt.id.key(),
            patient_id: appt.patient_id.key(),
            patient_name: appt.patient_name,
            date: appt.date,
            time: appt.time,
            duration: appt.duration,
            treatment: appt.treatment,
            status: appt.status.as_str().to_string(),
            notes: appt.notes,
            estimated_cost: appt.estimated_cost,
            insurance_details: appt.insurance_details,
            reason: appt.reason,
            is_recurring: appt.is_recurring,
            recurring_interval: appt.recurring_interval,
            reminder_sent: appt.reminder_sent,
            last_reminder_date: appt.last_reminder_date,
            dentist_id: appt.dentist_id,
            dentist_name: appt.dentist_name,
            room: appt.room,
        }
    }
}

impl TryFrom<FfiAppointment> for Appointment {
    type Error = DentalDeskError;

    fn try_from(appt: FfiAppointment) -> Result<Self, Self::Error> {
        let status = AppointmentStatus::parse(&appt.status).ok_or_else(|| {
            DentalDeskError::InvalidInput(format!("Unknown appointment status: {}", appt.status))
        })?;
        Ok(Appointment {
            id: RecordId::from(appt.id),
            patient_id: RecordId::from(appt.patient_id),
            patient_name: appt.patient_name,
            date: appt.date,
            time: appt.time,
            duration: appt.duration,
            treatment: appt.treatment,
            status,
            notes: appt.notes,
            estimated_cost: appt.estimated_cost,
            insurance_details: appt.insurance_details,
            reason: appt.reason,
            is_recurring: appt.is_recurring,
            recurring_interval: appt.recurring_interval,
            reminder_sent: appt.reminder_sent,
            last_reminder_date: appt.last_reminder_date,
            dentist_id: appt.dentist_id,
            dentist_name: appt.dentist_name,
            room: appt.room,
        })
    }
}

/// FFI-safe attachment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAttachment {
    pub name: String,
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
    pub uploaded_at: String,
}

impl From<Attachment> for FfiAttachment {
    fn from(a: Attachment) -> Self {
        Self {
            name: a.name,
            mime_type: a.mime_type,
            data: a.data,
            uploaded_at: a.uploaded_at,
        }
    }
}

impl From<FfiAttachment> for Attachment {
    fn from(a: FfiAttachment) -> Self {
        Attachment {
            name: a.name,
            mime_type: a.mime_type,
            data: a.data,
            uploaded_at: a.uploaded_at,
        }
    }
}

/// FFI-safe treatment record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTreatment {
    /// Ignored on add
    pub id: String,
    pub patient_id: String,
    /// Filled from the patient record when blank on add
    pub patient_name: String,
    pub date: String,
    pub treatment: String,
    pub notes: String,
    pub cost: f64,
    pub payment_status: String,
    pub next_visit_recommended: String,
    pub dentist_notes: String,
    pub attachments: Vec<FfiAttachment>,
}

impl From<Treatment> for FfiTreatment {
    fn from(t: Treatment) -> Self {
        Self {
            id: t.id.key(),
            patient_id: t.patient_id.key(),
            patient_name: t.patient_name,
            date: t.date,
            treatment: t.treatment,
            notes: t.notes,
            cost: t.cost,
            payment_status: t.payment_status.as_str().to_string(),
            next_visit_recommended: t.next_visit_recommended,
            dentist_notes: t.dentist_notes,
            attachments: t.attachments.into_iter().map(|a| a.into()).collect(),
        }
    }
}

impl TryFrom<FfiTreatment> for Treatment {
    type Error = DentalDeskError;

    fn try_from(t: FfiTreatment) -> Result<Self, Self::Error> {
        let payment_status = PaymentStatus::parse(&t.payment_status).ok_or_else(|| {
            DentalDeskError::InvalidInput(format!("Unknown payment status: {}", t.payment_status))
        })?;
        Ok(Treatment {
            id: RecordId::from(t.id),
            patient_id: RecordId::from(t.patient_id),
            patient_name: t.patient_name,
            date: t.date,
            treatment: t.treatment,
            notes: t.notes,
            cost: t.cost,
            payment_status,
            next_visit_recommended: t.next_visit_recommended,
            dentist_notes: t.dentist_notes,
            attachments: t.attachments.into_iter().map(|a| a.into()).collect(),
        })
    }
}

/// FFI-safe cascade delete summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCascadeSummary {
    pub patient_removed: bool,
    pub appointments_removed: u64,
    pub treatments_removed: u64,
}

impl From<CascadeSummary> for FfiCascadeSummary {
    fn from(s: CascadeSummary) -> Self {
        Self {
            patient_removed: s.patient_removed,
            appointments_removed: s.appointments_removed as u64,
            treatments_removed: s.treatments_removed as u64,
        }
    }
}

/// FFI-safe calendar cell.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalendarDay {
    /// Day of month
    pub day: u32,
    pub appointments: Vec<FfiAppointment>,
}

/// FFI-safe patient ranking entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientVisitCount {
    pub patient_id: String,
    pub name: String,
    pub appointments: u64,
}

impl From<dashboard::PatientVisitCount> for FfiPatientVisitCount {
    fn from(count: dashboard::PatientVisitCount) -> Self {
        Self {
            patient_id: count.patient_id.key(),
            name: count.name,
            appointments: count.appointments as u64,
        }
    }
}

/// FFI-safe dashboard figures.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDashboardStats {
    pub total_patients: u64,
    pub active_patients: u64,
    pub upcoming_appointments: u64,
    pub revenue: f64,
    pub completed_treatments: u64,
    pub pending_treatments: u64,
    pub confirmation_rate: u32,
}

impl From<DashboardStats> for FfiDashboardStats {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_patients: s.total_patients as u64,
            active_patients: s.active_patients as u64,
            upcoming_appointments: s.upcoming_appointments as u64,
            revenue: s.revenue,
            completed_treatments: s.completed_treatments as u64,
            pending_treatments: s.pending_treatments as u64,
            confirmation_rate: s.confirmation_rate,
        }
    }
}
