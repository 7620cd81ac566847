//! Password encoding and comparison.
//!
//! Every place that stores or checks a password goes through a
//! [`CredentialScheme`], so swapping plaintext for a hash touches only
//! the scheme handed to the `AuthStore`.

use sha2::{Digest, Sha256};

/// How passwords are stored and checked.
pub trait CredentialScheme: Send + Sync {
    /// Encode a password for storage.
    fn encode(&self, password: &str) -> String;

    /// Check a supplied password against a stored value.
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

/// Stores passwords as-is and compares them exactly (case-sensitive).
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextCredentials;

impl CredentialScheme for PlaintextCredentials {
    fn encode(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

/// Stores the hex-encoded SHA-256 digest of each password.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Credentials;

impl CredentialScheme for Sha256Credentials {
    fn encode(&self, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == self.encode(supplied)
    }
}
