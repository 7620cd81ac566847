//! Demo data written on first start (or on explicit reset).
//!
//! One appointment and one treatment are dated on the seeding day so the
//! dashboard always has something current to show.

use chrono::{Days, NaiveDate};

use crate::auth::CredentialScheme;
use crate::models::{
    Appointment, AppointmentStatus, Attachment, Gender, HealthInfo, Patient, PaymentStatus, Role,
    Treatment, User,
};

const XRAY_JPEG: &str = "data:image/jpeg;base64,/9j/4AAQSkZJRgABAQEASABIAAD/2wBDAAMCAgICAgMCAgIDAwMDBAYEBAQEBAgGBgUGCQgKCgkICQkKDA8MCgsOCwkJDRENDg8QEBEQCgwSExIQEw8QEBD/wAALCABAAEABAREA/8QAFQABAQAAAAAAAAAAAAAAAAAAAAn/xAAUEAEAAAAAAAAAAAAAAAAAAAAA/9oACAEBAAA/AKpgAAAAAAAAAAAAAAAAAAAAH//Z";

const INVOICE_PDF: &str = "data:application/pdf;base64,JVBERi0xLjMKJcTl8uXrp/Og0MTGCjQgMCBvYmoKPDwgL0xlbmd0aCA1IDAgUiAvRmlsdGVyIC9GbGF0ZURlY29kZSA+PgpzdHJlYW0KeAFLy0gtSgQADMMBCmVuZHN0cmVhbQplbmRvYmoKNSAwIG9iagoxMgplbmRvYmoKMiAwIG9iago8PCAvVHlwZSAvUGFnZSAvUGFyZW50IDMgMCBSIC9SZXNvdXJjZXMgNiAwIFIgL0NvbnRlbnRzIDQgMCBSIC9NZWRpYUJveCBbMCAwIDYxMiA3OTJdCj4+CmVuZG9iago2IDAgb2JqCjw8IC9Qcm9jU2V0IFsgL1BERiBdIC9Db2xvclNwYWNlIDw8IC9DczEgNyAwIFIgPj4gPj4KZW5kb2JqCjggMCBvYmoKPDwgL0xlbmd0aCA5IDAgUiAvTiAxIC9BbHRlcm5hdGUgL0RldmljZUdyYXkgL0ZpbHRlciAvRmxhdGVEZWNvZGUgPj4Kc3RyZWFtCngBKYpJjYrJzEvVS87P1UtOLNJzzs/VL0ktLtEPKMrPTs0rKcpMzywGAP/1CzUKZW5kc3RyZWFtCmVuZG9iago5IDAgb2JqCjUyCmVuZG9iagoxMCAwIG9iago8PCAvVHlwZSAvRm9udCAvU3VidHlwZSAvVHlwZTEgL05hbWUgL0YxIC9CYXNlRm9udCAvSGVsdmV0aWNhID4+CmVuZG9iagozIDAgb2JqCjw8IC9UeXBlIC9QYWdlcyAvTWVkaWFCb3ggWzAgMCA2MTIgNzkyXSAvQ291bnQgMSAvS2lkcyBbIDIgMCBSIF0gPj4KZW5kb2JqCjExIDAgb2JqCjw8IC9UeXBlIC9DYXRhbG9nIC9QYWdlcyAzIDAgUiA+PgplbmRvYmoKNyAwIG9iagpbIC9JQ0NCYXNlZCA4IDAgUiBdCmVuZG9iagoxMiAwIG9iago8PCAvVGl0bGUgKERlbnRhbCBJbnZvaWNlKSAvQXV0aG9yIChEZW50YWwgQ2xpbmljKSAvQ3JlYXRvciAoRGVudGFsIFN5c3RlbSkKPj4KZW5kb2JqCnhyZWYKMCAxMwowMDAwMDAwMDAwIDY1NTM1IGYgCjAwMDAwMDAwMDkgMDAwMDAgbiAKMDAwMDAwMDA5OCAwMDAwMCBuIAowMDAwMDAwNDk2IDAwMDAwIG4gCjAwMDAwMDAwMTUgMDAwMDAgbiAKMDAwMDAwMDA3NyAwMDAwMCBuIAowMDAwMDAwMTk2IDAwMDAwIG4gCjAwMDAwMDA1OTEgMDAwMDAgbiAKMDAwMDAwMDI2MSAwMDAwMCBuIAowMDAwMDAwMzk0IDAwMDAwIG4gCjAwMDAwMDA0MTMgMDAwMDAgbiAKMDAwMDAwMDU1MiAwMDAwMCBuIAowMDAwMDAwNjI1IDAwMDAwIG4gCnRyYWlsZXIKPDwgL1NpemUgMTMgL1Jvb3QgMTEgMCBSIC9JbmZvIDEyIDAgUiAvSUQgWyA8NjUzY2E2MzFlOTM5NjNiYjA2YzQ3MTU2ZjE5YmUzYTI+Cjw2NTNjYTYzMWU5Mzk2M2JiMDZjNDcxNTZmMTliZTNhMj4gXSA+PgpzdGFydHhyZWYKNzMzCiUlRU9GCg==";

const DENTIST_NAME: &str = "Dr. John Smith";

/// Demo logins: one admin and five patients.
pub fn demo_users(credentials: &dyn CredentialScheme) -> Vec<User> {
    let accounts = [
        (1, "admin", "admin123", Role::Admin, "Dr. John Smith"),
        (2, "patient1", "patient123", Role::Patient, "Jane Doe"),
        (3, "patient2", "patient123", Role::Patient, "John Doe"),
        (4, "patient3", "patient123", Role::Patient, "Robert Johnson"),
        (5, "patient4", "patient123", Role::Patient, "Emily Davis"),
        (6, "patient5", "patient123", Role::Patient, "Michael Wilson"),
    ];

    accounts
        .into_iter()
        .map(|(id, username, password, role, name)| User {
            id,
            username: username.into(),
            password: credentials.encode(password),
            role,
            name: name.into(),
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn patient(
    id: i64,
    name: &str,
    age: u32,
    gender: Gender,
    contact: &str,
    email: &str,
    address: &str,
    last_visit: &str,
    next_appointment: &str,
    health: [&str; 6],
) -> Patient {
    let [allergies, medical_history, current_medications, emergency_contact, blood_type, notes] =
        health;
    Patient {
        id: id.into(),
        name: name.into(),
        age,
        gender,
        contact: contact.into(),
        email: email.into(),
        address: address.into(),
        last_visit: last_visit.into(),
        next_appointment: next_appointment.into(),
        health_info: Some(HealthInfo {
            allergies: allergies.into(),
            medical_history: medical_history.into(),
            current_medications: current_medications.into(),
            emergency_contact: emergency_contact.into(),
            blood_type: blood_type.into(),
            notes: notes.into(),
        }),
    }
}

/// Six demo patients; the last one is the clinic's own dentist.
pub fn demo_patients() -> Vec<Patient> {
    vec![
        patient(
            1, "John Doe", 35, Gender::Male, "555-1234", "john@example.com", "123 Main St",
            "2025-06-15", "2025-07-15",
            ["Penicillin", "Hypertension", "Lisinopril", "Mary Doe, 555-9876", "O+",
             "Patient is anxious about dental procedures"],
        ),
        patient(
            2, "Jane Doe", 28, Gender::Female, "555-5678", "jane@example.com", "456 Oak Ave",
            "2025-06-20", "2025-07-20",
            ["None", "None", "Birth control", "John Doe, 555-1234", "A+",
             "Patient prefers morning appointments"],
        ),
        patient(
            3, "Robert Johnson", 42, Gender::Male, "555-9012", "robert@example.com", "789 Pine Rd",
            "2025-06-10", "2025-07-10",
            ["Latex", "Diabetes Type 2", "Metformin", "Sarah Johnson, 555-3344", "B-",
             "Patient requires longer appointments due to anxiety"],
        ),
        patient(
            4, "Emily Davis", 31, Gender::Female, "555-3456", "emily@example.com", "101 Cedar Ln",
            "2025-06-25", "2025-07-25",
            ["Aspirin", "Asthma", "Albuterol inhaler", "James Davis, 555-6789", "AB+",
             "Patient prefers nitrous oxide during procedures"],
        ),
        patient(
            5, "Michael Wilson", 45, Gender::Male, "555-7890", "michael@example.com", "202 Elm St",
            "2025-06-05", "2025-07-05",
            ["Sulfa drugs", "Heart murmur", "None", "Linda Wilson, 555-2345", "O-",
             "Requires antibiotic prophylaxis before procedures"],
        ),
        patient(
            6, "Dr. John Smith", 45, Gender::Male, "555-1111", "admin@example.com",
            "100 Hospital Ave", "", "",
            ["None", "None", "None", "Hospital Main Desk, 555-0000", "A+", "Staff member"],
        ),
    ]
}

struct Booking {
    id: i64,
    patient_id: i64,
    patient_name: &'static str,
    date: String,
    time: &'static str,
    duration: u32,
    treatment: &'static str,
    status: AppointmentStatus,
    notes: &'static str,
    estimated_cost: f64,
    insurance: &'static str,
    reason: &'static str,
    recurring_interval: Option<&'static str>,
    last_reminder_date: Option<String>,
    room: &'static str,
}

impl From<Booking> for Appointment {
    fn from(b: Booking) -> Self {
        Appointment {
            id: b.id.into(),
            patient_id: b.patient_id.into(),
            patient_name: b.patient_name.into(),
            date: b.date,
            time: b.time.into(),
            duration: b.duration,
            treatment: b.treatment.into(),
            status: b.status,
            notes: b.notes.into(),
            estimated_cost: b.estimated_cost,
            insurance_details: Some(b.insurance.into()),
            reason: Some(b.reason.into()),
            is_recurring: Some(b.recurring_interval.is_some()),
            recurring_interval: b.recurring_interval.map(Into::into),
            reminder_sent: Some(b.last_reminder_date.is_some()),
            last_reminder_date: b.last_reminder_date,
            dentist_id: Some(1),
            dentist_name: Some(DENTIST_NAME.into()),
            room: Some(b.room.into()),
        }
    }
}

/// Six demo appointments; the last is booked for `today`.
pub fn demo_appointments(today: NaiveDate) -> Vec<Appointment> {
    let today = today.format("%Y-%m-%d").to_string();

    vec![
        Booking {
            id: 1, patient_id: 1, patient_name: "John Doe", date: "2025-07-15".into(),
            time: "10:00", duration: 30, treatment: "Regular Checkup",
            status: AppointmentStatus::Scheduled, notes: "Follow-up on previous treatment",
            estimated_cost: 120.0, insurance: "Coverage: 80%, Delta Dental",
            reason: "Routine six-month checkup", recurring_interval: Some("semi-annual"),
            last_reminder_date: None, room: "Examination Room 1",
        },
        Booking {
            id: 2, patient_id: 2, patient_name: "Jane Doe", date: "2025-07-20".into(),
            time: "11:30", duration: 60, treatment: "Teeth Cleaning",
            status: AppointmentStatus::Confirmed, notes: "Patient requested early appointment",
            estimated_cost: 150.0, insurance: "Coverage: 100%, Aetna Dental",
            reason: "Regular cleaning and checkup", recurring_interval: Some("annual"),
            last_reminder_date: Some("2025-07-13".into()), room: "Hygiene Room 2",
        },
        Booking {
            id: 3, patient_id: 3, patient_name: "Robert Johnson", date: "2025-07-10".into(),
            time: "14:00", duration: 90, treatment: "Root Canal",
            status: AppointmentStatus::Scheduled, notes: "Patient has dental anxiety",
            estimated_cost: 1200.0, insurance: "Coverage: 60%, MetLife Dental",
            reason: "Severe tooth pain and infection", recurring_interval: None,
            last_reminder_date: Some("2025-07-03".into()), room: "Surgery Room 1",
        },
        Booking {
            id: 4, patient_id: 4, patient_name: "Emily Davis", date: "2025-07-25".into(),
            time: "15:30", duration: 45, treatment: "Extraction",
            status: AppointmentStatus::Pending, notes: "Wisdom tooth extraction",
            estimated_cost: 450.0, insurance: "Coverage: 70%, Cigna Dental",
            reason: "Impacted wisdom tooth causing pain", recurring_interval: None,
            last_reminder_date: None, room: "Surgery Room 2",
        },
        Booking {
            id: 5, patient_id: 5, patient_name: "Michael Wilson", date: "2025-07-05".into(),
            time: "09:00", duration: 30, treatment: "Orthodontics",
            status: AppointmentStatus::Confirmed, notes: "Braces adjustment",
            estimated_cost: 200.0, insurance: "Coverage: 50%, Guardian Dental",
            reason: "Monthly adjustment of braces", recurring_interval: Some("monthly"),
            last_reminder_date: Some("2025-07-01".into()), room: "Orthodontics Room",
        },
        Booking {
            id: 6, patient_id: 2, patient_name: "Jane Doe", date: today.clone(),
            time: "14:00", duration: 30, treatment: "Emergency Checkup",
            status: AppointmentStatus::Confirmed, notes: "Tooth pain",
            estimated_cost: 95.0, insurance: "Coverage: 90%, Aetna Dental",
            reason: "Sudden tooth pain in lower right molar", recurring_interval: None,
            last_reminder_date: Some(today), room: "Emergency Room",
        },
    ]
    .into_iter()
    .map(Appointment::from)
    .collect()
}

fn attachment(name: &str, mime_type: &str, data: &str, uploaded_at: &str) -> Attachment {
    Attachment {
        name: name.into(),
        mime_type: mime_type.into(),
        data: data.into(),
        uploaded_at: uploaded_at.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn treatment(
    id: i64,
    patient_id: i64,
    patient_name: &str,
    date: &str,
    kind: &str,
    notes: &str,
    cost: f64,
    payment_status: PaymentStatus,
    next_visit: &str,
    dentist_notes: &str,
    attachments: Vec<Attachment>,
) -> Treatment {
    Treatment {
        id: id.into(),
        patient_id: patient_id.into(),
        patient_name: patient_name.into(),
        date: date.into(),
        treatment: kind.into(),
        notes: notes.into(),
        cost,
        payment_status,
        next_visit_recommended: next_visit.into(),
        dentist_notes: dentist_notes.into(),
        attachments,
    }
}

/// Six demo treatment records; the last is dated `today` with a
/// follow-up one week later.
pub fn demo_treatments(today: NaiveDate) -> Vec<Treatment> {
    let follow_up = today
        .checked_add_days(Days::new(7))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string();
    let today = today.format("%Y-%m-%d").to_string();

    vec![
        treatment(
            1, 1, "John Doe", "2025-06-15", "Regular Checkup", "No issues found", 120.0,
            PaymentStatus::Paid, "2025-12-15", "Maintain regular brushing and flossing routine",
            vec![attachment("dental_xray.jpg", "image/jpeg", XRAY_JPEG, "2025-06-15")],
        ),
        treatment(
            2, 2, "Jane Doe", "2025-06-20", "Cavity Filling", "Filled cavity in upper molar",
            250.0, PaymentStatus::Pending, "2025-09-20",
            "Monitor for sensitivity, avoid hard foods for 24 hours",
            vec![attachment("treatment_invoice.pdf", "application/pdf", INVOICE_PDF, "2025-06-20")],
        ),
        treatment(
            3, 3, "Robert Johnson", "2025-06-10", "Root Canal", "Successful procedure", 950.0,
            PaymentStatus::Paid, "2025-07-10",
            "Follow up appointment scheduled for crown placement",
            vec![attachment("post_treatment.jpg", "image/jpeg", XRAY_JPEG, "2025-06-10")],
        ),
        treatment(
            4, 4, "Emily Davis", "2025-06-25", "Teeth Whitening", "Significant improvement",
            350.0, PaymentStatus::Paid, "2026-06-25",
            "Maintain results with home care kit provided", Vec::new(),
        ),
        treatment(
            5, 5, "Michael Wilson", "2025-06-05", "Braces Adjustment", "Progress as expected",
            150.0, PaymentStatus::InsuranceClaimSubmitted, "2025-07-05",
            "Monthly adjustment required, progress photos taken", Vec::new(),
        ),
        treatment(
            6, 2, "Jane Doe", &today, "Emergency Checkup", "Prescribed pain medication", 85.0,
            PaymentStatus::Pending, &follow_up, "Pain in lower right molar, possible infection",
            Vec::new(),
        ),
    ]
}
