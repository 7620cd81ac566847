//! Configuration constants and runtime options.

use serde::{Deserialize, Serialize};

// ===== Storage Keys =====

/// Current session record.
pub const AUTH_KEY: &str = "dental_auth";
/// Registered users table.
pub const USERS_KEY: &str = "dental_users";
/// Patients collection.
pub const PATIENTS_KEY: &str = "dental_patients";
/// Appointments collection.
pub const APPOINTMENTS_KEY: &str = "dental_appointments";
/// Treatments collection.
pub const TREATMENTS_KEY: &str = "dental_treatments";

// ===== Limits =====

/// Upload cap for a single attachment (5 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Name shown when an appointment or treatment points at a missing patient.
pub const UNKNOWN_PATIENT_NAME: &str = "Unknown Patient";

/// Treatment types offered when booking or recording a visit.
///
/// Seed data and older records may carry other values; the store never
/// rejects a treatment string that is not in this list.
pub const TREATMENT_OPTIONS: &[&str] = &[
    "Regular Checkup",
    "Teeth Cleaning",
    "Root Canal",
    "Extraction",
    "Orthodontics",
    "Dental Implants",
    "Teeth Whitening",
    "Fillings",
];

/// Log filter used when neither the caller nor `RUST_LOG` supplies one.
pub const DEFAULT_LOG_FILTER: &str = "dental_desk_core=info";

/// When demo data is written into storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Seed a collection only if its key is missing.
    #[default]
    IfAbsent,
    /// Overwrite every collection with demo data.
    Always,
}

impl SeedPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            SeedPolicy::IfAbsent => "if_absent",
            SeedPolicy::Always => "always",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "if_absent" => Some(SeedPolicy::IfAbsent),
            "always" => Some(SeedPolicy::Always),
            _ => None,
        }
    }
}

/// Runtime options for a desk instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskConfig {
    pub seed_policy: SeedPolicy,
    pub max_attachment_bytes: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            seed_policy: SeedPolicy::IfAbsent,
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert_eq!(config.seed_policy, SeedPolicy::IfAbsent);
        assert_eq!(config.max_attachment_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn test_seed_policy_parse() {
        assert_eq!(SeedPolicy::parse("always"), Some(SeedPolicy::Always));
        assert_eq!(SeedPolicy::parse(SeedPolicy::IfAbsent.as_str()), Some(SeedPolicy::IfAbsent));
        assert_eq!(SeedPolicy::parse("sometimes"), None);
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys = [AUTH_KEY, USERS_KEY, PATIENTS_KEY, APPOINTMENTS_KEY, TREATMENTS_KEY];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
