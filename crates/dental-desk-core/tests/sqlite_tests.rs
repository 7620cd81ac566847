//! Persistence through the SQLite backend.

use std::sync::Arc;

use chrono::NaiveDate;
use dental_desk_core::models::{Gender, HealthInfo, Patient};
use dental_desk_core::{AuthStore, ClinicalStore, SeedPolicy, SqliteStorage};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn open(dir: &TempDir) -> (AuthStore, ClinicalStore) {
    let storage = Arc::new(SqliteStorage::open(dir.path().join("desk.db")).unwrap());
    (AuthStore::new(storage.clone()), ClinicalStore::new(storage))
}

#[test]
fn test_collections_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let before = {
        let (auth, clinical) = open(&dir);
        auth.initialize(SeedPolicy::IfAbsent).unwrap();
        clinical.initialize_at(SeedPolicy::IfAbsent, today()).unwrap();

        let mut patient = Patient::new("Ada Lovelace", 36, Gender::Female);
        patient.health_info = Some(HealthInfo {
            allergies: "Latex".into(),
            ..Default::default()
        });
        clinical.add_patient(patient).unwrap();
        auth.login("admin", "admin123").unwrap();

        (
            clinical.list_patients(),
            clinical.list_appointments(),
            clinical.list_treatments(),
        )
    };

    let (auth, clinical) = open(&dir);
    assert_eq!(clinical.list_patients(), before.0);
    assert_eq!(clinical.list_appointments(), before.1);
    assert_eq!(clinical.list_treatments(), before.2);
    assert!(auth.current_session().is_admin());
}

#[test]
fn test_seed_if_absent_on_existing_file() {
    let dir = TempDir::new().unwrap();
    {
        let (_, clinical) = open(&dir);
        clinical.initialize_at(SeedPolicy::IfAbsent, today()).unwrap();
        let mut patient = clinical.list_patients().remove(0);
        patient.name = "Johnny Doe".into();
        clinical.update_patient(patient).unwrap();
    }

    let (_, clinical) = open(&dir);
    clinical.initialize_at(SeedPolicy::IfAbsent, today()).unwrap();
    assert_eq!(clinical.list_patients()[0].name, "Johnny Doe");
    assert_eq!(
        clinical.list_appointments_for_patient(&1.into())[0].patient_name,
        "Johnny Doe"
    );
}

#[test]
fn test_ffi_open_sqlite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ffi.db").to_string_lossy().into_owned();

    {
        let desk = dental_desk_core::open_sqlite(path.clone(), None).unwrap();
        desk.login("admin".into(), "admin123".into()).unwrap();
        assert!(desk.delete_patient("6".into()).unwrap());
    }

    let desk = dental_desk_core::open_sqlite(path, None).unwrap();
    assert!(desk.current_session().unwrap().is_authenticated);
    assert_eq!(desk.visible_patients().unwrap().len(), 5);
}
