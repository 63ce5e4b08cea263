//! Document identifiers
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters:
//!
//! | bytes | content                                  |
//! |-------|------------------------------------------|
//! | 0..4  | seconds since the Unix epoch, big-endian |
//! | 4..9  | random value fixed for the process       |
//! | 9..12 | counter, big-endian, random start        |

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Length of the textual form.
pub const OBJECT_ID_HEX_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00ff_ffff;

/// Error returned when a string is not a well-formed identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid document identifier")]
pub struct ParseObjectIdError(String);

/// A store-generated document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generates a fresh identifier
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Generates an identifier with an explicit timestamp component
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        let secs = timestamp.timestamp().clamp(0, u32::MAX as i64) as u32;
        let count = next_count();

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(process_unique());
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Returns whether `s` is a syntactically valid identifier.
    ///
    /// Only the shape is checked; nothing is looked up.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<ObjectId>().is_ok()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != OBJECT_ID_HEX_LEN || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseObjectIdError(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| ParseObjectIdError(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

fn process_unique() -> &'static [u8; 5] {
    static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
    PROCESS_UNIQUE.get_or_init(rand::random)
}

fn next_count() -> u32 {
    static COUNTER: OnceLock<AtomicU32> = OnceLock::new();
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::random::<u32>() & COUNTER_MASK))
        .fetch_add(1, Ordering::Relaxed)
        & COUNTER_MASK
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_display_is_24_lowercase_hex() {
        let id = ObjectId::new().to_string();
        assert_eq!(id.len(), OBJECT_ID_HEX_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_parse_round_trips() {
        let id = ObjectId::new();
        let parsed: ObjectId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_accepts_uppercase() {
        assert!(ObjectId::is_valid("507F1F77BCF86CD799439011"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!ObjectId::is_valid("not-a-valid-id"));
        assert!(!ObjectId::is_valid(""));
        assert!(!ObjectId::is_valid("507f1f77bcf86cd79943901"));
        assert!(!ObjectId::is_valid("507f1f77bcf86cd7994390111"));
        assert!(!ObjectId::is_valid("507f1f77bcf86cd79943901g"));
        assert!(!ObjectId::is_valid("+07f1f77bcf86cd799439011"));
        // 24 bytes but multi-byte characters
        assert!(!ObjectId::is_valid("ééééééééééææ"));
    }

    #[test]
    fn test_consecutive_ids_differ() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_component() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let id = ObjectId::at(at).to_string();
        assert_eq!(&id[..8], format!("{:08x}", at.timestamp()));
    }
}
