//! Encoding and decoding of treatment attachments.
//!
//! Attachments are stored inline as `data:<mime>;base64,<payload>` URIs,
//! so every byte counts against the storage quota.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use crate::models::Attachment;

/// Attachment errors.
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Attachment is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    #[error("Base64 decode error: {0}")]
    Decode(#[from] base64::DecodeError),
}

pub type AttachmentResult<T> = Result<T, AttachmentError>;

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

impl Attachment {
    /// Build an attachment from raw file bytes.
    ///
    /// Files over `max_bytes` are rejected before encoding.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
        uploaded_at: impl Into<String>,
        max_bytes: usize,
    ) -> AttachmentResult<Self> {
        if bytes.len() > max_bytes {
            return Err(AttachmentError::TooLarge {
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let mime_type = mime_type.into();
        let data = format!("{DATA_PREFIX}{mime_type}{BASE64_MARKER}{}", STANDARD.encode(bytes));
        Ok(Self {
            name: name.into(),
            mime_type,
            data,
            uploaded_at: uploaded_at.into(),
        })
    }

    fn payload(&self) -> AttachmentResult<&str> {
        let rest = self
            .data
            .strip_prefix(DATA_PREFIX)
            .ok_or_else(|| AttachmentError::InvalidDataUri("missing data: prefix".into()))?;
        let (_, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or_else(|| AttachmentError::InvalidDataUri("not base64 encoded".into()))?;
        Ok(payload)
    }

    /// The raw file bytes.
    pub fn decode(&self) -> AttachmentResult<Vec<u8>> {
        Ok(STANDARD.decode(self.payload()?)?)
    }

    /// Decoded length estimated from the payload, without decoding.
    ///
    /// Zero for a malformed URI.
    pub fn size_hint(&self) -> usize {
        let Ok(payload) = self.payload() else {
            return 0;
        };
        let padding = payload.bytes().rev().take_while(|b| *b == b'=').count();
        (payload.len() / 4 * 3).saturating_sub(padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(bytes: &[u8]) -> Attachment {
        Attachment::from_bytes("note.txt", "text/plain", bytes, "2026-03-14", 1024).unwrap()
    }

    #[test]
    fn test_from_bytes() {
        let attachment = note(b"hi");
        assert_eq!(attachment.data, "data:text/plain;base64,aGk=");
        assert_eq!(attachment.mime_type, "text/plain");
        assert_eq!(attachment.decode().unwrap(), b"hi");
    }

    #[test]
    fn test_too_large() {
        let err = Attachment::from_bytes("scan.jpg", "image/jpeg", &[0u8; 11], "", 10).unwrap_err();
        assert!(matches!(err, AttachmentError::TooLarge { size: 11, limit: 10 }));
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(Attachment::from_bytes("a", "text/plain", &[1u8; 10], "", 10).is_ok());
    }

    #[test]
    fn test_size_hint() {
        assert_eq!(note(b"").size_hint(), 0);
        assert_eq!(note(b"a").size_hint(), 1);
        assert_eq!(note(b"ab").size_hint(), 2);
        assert_eq!(note(b"abc").size_hint(), 3);
        assert_eq!(note(b"hello world").size_hint(), 11);
    }

    #[test]
    fn test_invalid_uri() {
        let mut attachment = note(b"hi");
        attachment.data = "https://example.com/x.png".into();
        assert!(matches!(attachment.decode(), Err(AttachmentError::InvalidDataUri(_))));
        assert_eq!(attachment.size_hint(), 0);

        attachment.data = "data:text/plain,hi".into();
        assert!(matches!(attachment.decode(), Err(AttachmentError::InvalidDataUri(_))));
    }

    #[test]
    fn test_corrupt_payload() {
        let mut attachment = note(b"hi");
        attachment.data = "data:text/plain;base64,!!!".into();
        assert!(matches!(attachment.decode(), Err(AttachmentError::Decode(_))));
    }

    #[test]
    fn test_seed_attachments_decode() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        for treatment in crate::seed::demo_treatments(today) {
            for attachment in &treatment.attachments {
                let bytes = attachment.decode().unwrap();
                assert_eq!(bytes.len(), attachment.size_hint());
            }
        }
    }
}
