//! End-to-end walk through a seeded desk.

use std::sync::Arc;

use chrono::NaiveDate;
use dental_desk_core::models::{Appointment, Role, Session};
use dental_desk_core::{
    AccessFilter, AuthStore, ClinicalStore, KeyValueStore, MemoryStorage, RecordId, SeedPolicy,
};

fn seeded() -> (AuthStore, ClinicalStore) {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
    let auth = AuthStore::new(storage.clone());
    let clinical = ClinicalStore::new(storage);

    auth.initialize(SeedPolicy::IfAbsent).unwrap();
    clinical
        .initialize_at(SeedPolicy::IfAbsent, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())
        .unwrap();
    (auth, clinical)
}

#[test]
fn test_front_desk_scenario() {
    let (auth, clinical) = seeded();

    let patients = clinical.list_patients();
    assert_eq!(patients.len(), 6);
    let john = patients.iter().find(|p| p.name == "John Doe").unwrap();
    assert_eq!(john.id, RecordId::Number(1));

    let session = auth.login("admin", "admin123").unwrap();
    assert_eq!(session.role(), Some(Role::Admin));

    let rejected = auth.login("admin", "wrong").unwrap();
    assert!(!rejected.is_authenticated);

    let patient_id = RecordId::Number(1);
    let added = clinical
        .add_appointment(Appointment::new(1, "2026-04-02", "10:00", "Teeth Cleaning"))
        .unwrap();
    assert!(clinical
        .list_appointments_for_patient(&patient_id)
        .contains(&added));

    assert!(clinical.delete_appointment(&added.id).unwrap());
    assert!(!clinical
        .list_appointments_for_patient(&patient_id)
        .iter()
        .any(|a| a.id == added.id));
}

#[test]
fn test_failed_login_keeps_previous_session() {
    let (auth, _) = seeded();
    auth.login("admin", "admin123").unwrap();
    auth.login("admin", "wrong").unwrap();

    assert!(auth.current_session().is_admin());
}

#[test]
fn test_patient_login_scopes_records() {
    let (auth, clinical) = seeded();
    let session = auth.login("patient1", "patient123").unwrap();

    let visible = AccessFilter::new(&session).apply(&clinical);
    assert_eq!(visible.patients.len(), 1);
    assert_eq!(visible.patients[0].name, "Jane Doe");
    assert!(visible
        .appointments
        .iter()
        .all(|a| a.patient_id == visible.patients[0].id));
    assert!(visible
        .treatments
        .iter()
        .all(|t| t.patient_id == visible.patients[0].id));

    auth.logout().unwrap();
    let after = AccessFilter::new(&auth.current_session()).apply(&clinical);
    assert!(after.patients.is_empty());
    assert_eq!(auth.current_session(), Session::cleared());
}

#[test]
fn test_reopen_keeps_edits() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStorage::new());
    let today = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

    let clinical = ClinicalStore::new(storage.clone());
    clinical.initialize_at(SeedPolicy::IfAbsent, today).unwrap();
    clinical.delete_patient(&RecordId::Number(6)).unwrap();

    // A second startup must not resurrect the deleted patient
    let reopened = ClinicalStore::new(storage);
    reopened.initialize_at(SeedPolicy::IfAbsent, today).unwrap();
    assert_eq!(reopened.list_patients().len(), 5);

    reopened.reset_demo_data().unwrap();
    assert_eq!(reopened.list_patients().len(), 6);
}
