//! Primary keys for stored documents
//!
//! Keys are 12 raw bytes rendered as 24 lowercase hex characters: a 4-byte
//! big-endian unix-seconds timestamp followed by 8 random bytes. Path
//! parameters arrive as strings and must be converted with [`ObjectId::parse`]
//! before they can be used in any store query.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Raw key width in bytes
const KEY_LEN: usize = 12;

/// Native primary key for a stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; KEY_LEN]);

/// Primary key conversion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The path string is not a valid 24-hex-character key
    #[error("invalid primary key '{0}': expected 24 hex characters")]
    Invalid(String),
}

impl ObjectId {
    /// Generates a fresh key: unix-seconds timestamp plus a random tail
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        let secs = chrono::Utc::now().timestamp().max(0) as u32;
        bytes[..4].copy_from_slice(&secs.to_be_bytes());
        let tail: [u8; 8] = rand::random();
        bytes[4..].copy_from_slice(&tail);
        Self(bytes)
    }

    /// Converts a path-parameter string into a native key
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        if !s.is_ascii() || s.len() != KEY_LEN * 2 {
            return Err(KeyError::Invalid(s.to_string()));
        }

        let mut bytes = [0u8; KEY_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| KeyError::Invalid(s.to_string()))?;
        }
        Ok(Self(bytes))
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
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
