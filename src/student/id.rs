//! Student identifiers
//!
//! Identifiers are MongoDB object ids, carried over HTTP as 24 lowercase hex
//! characters.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Returned when a string is not a valid hex-encoded identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid student id '{input}': expected 24 hex characters")]
pub struct InvalidStudentId {
    input: String,
}

impl InvalidStudentId {
    /// The rejected input
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Store-assigned identifier of a student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentId(ObjectId);

impl StudentId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a hex-encoded identifier
    pub fn parse(input: &str) -> Result<Self, InvalidStudentId> {
        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| InvalidStudentId {
                input: input.to_string(),
            })
    }

    /// Hex encoding, as used in URLs and JSON bodies
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for StudentId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for StudentId {
    type Err = InvalidStudentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for StudentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for StudentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = StudentId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 24 character hex string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                StudentId::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_hex() {
        let id = StudentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.to_hex(), "65a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in ["", "123", "not-an-id", "65a1f0c2e4b0a1b2c3d4e5fz", "65a1f0c2e4b0a1b2c3d4e5f6aa"] {
            let err = StudentId::parse(input).unwrap_err();
            assert_eq!(err.input(), input);
        }
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        assert_ne!(StudentId::generate(), StudentId::generate());
    }

    #[test]
    fn test_from_str_roundtrip() {
        let id = StudentId::generate();
        let parsed: StudentId = id.to_hex().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
