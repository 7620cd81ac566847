//! Record identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Identifier of a clinical record.
///
/// Stored data carries both integer ids and string ids (older records
/// used a millisecond timestamp rendered as text). Both forms are kept
/// as-is on disk; equality and hashing go through [`RecordId::key`], so
/// `5` and `"5"` name the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Normalized comparison key.
    pub fn key(&self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s.trim().to_string(),
        }
    }

    /// Numeric value, if the id is (or spells) an integer.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Next id after the largest numeric id in `ids`, or 1 if none.
    /// `None` once the largest id is `i64::MAX`.
    pub fn next_after<'a, I>(ids: I) -> Option<RecordId>
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        match ids.into_iter().filter_map(RecordId::as_number).max() {
            None => Some(RecordId::Number(1)),
            Some(max) => max.checked_add(1).map(RecordId::Number),
        }
    }

    /// Placeholder for records that have not been stored yet.
    pub fn unassigned() -> RecordId {
        RecordId::Number(0)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        RecordId::unassigned()
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        match s.trim().parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(s.to_string()),
        }
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::from(s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_mixed_representations_are_equal() {
        assert_eq!(RecordId::Number(5), RecordId::Text("5".into()));
        assert_ne!(RecordId::Number(5), RecordId::Text("6".into()));
    }

    #[test]
    fn test_hash_matches_eq() {
        let mut set = HashSet::new();
        set.insert(RecordId::Number(1720000000000));
        assert!(set.contains(&RecordId::Text("1720000000000".into())));
    }

    #[test]
    fn test_serde_keeps_stored_form() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[3, "1720000000000", "abc"]"#).unwrap();
        assert!(matches!(ids[0], RecordId::Number(3)));
        assert!(matches!(ids[1], RecordId::Text(_)));
        assert_eq!(serde_json::to_string(&ids).unwrap(), r#"[3,"1720000000000","abc"]"#);
    }

    #[test]
    fn test_next_after() {
        let empty: Vec<RecordId> = Vec::new();
        assert_eq!(RecordId::next_after(&empty), Some(RecordId::Number(1)));

        let ids = vec![
            RecordId::Number(2),
            RecordId::Text("1720000000000".into()),
            RecordId::Text("legacy".into()),
        ];
        assert_eq!(
            RecordId::next_after(&ids),
            Some(RecordId::Number(1720000000001))
        );

        let full = vec![RecordId::Number(i64::MAX)];
        assert_eq!(RecordId::next_after(&full), None);
    }

    #[test]
    fn test_from_str_parses_numbers() {
        assert!(matches!(RecordId::from("42"), RecordId::Number(42)));
        assert!(matches!(RecordId::from("x-1"), RecordId::Text(_)));
    }
}
