//! # Student Records
//!
//! The single domain entity served by this service. A record carries a
//! store-assigned identifier, a caller-supplied code (`nim`), a name and a
//! major.

mod id;

pub use id::{InvalidStudentId, StudentId};

use serde::{Deserialize, Serialize};

/// A student record as seen over HTTP.
///
/// `id` is absent on create requests and present on every representation
/// returned after the store has assigned it. Missing string fields decode to
/// the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<StudentId>,

    /// Student number; unique by intent, not enforced.
    #[serde(default)]
    pub nim: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub major: String,
}

impl Student {
    /// Create a record without an identifier
    pub fn new(nim: impl Into<String>, name: impl Into<String>, major: impl Into<String>) -> Self {
        Self {
            id: None,
            nim: nim.into(),
            name: name.into(),
            major: major.into(),
        }
    }

    /// Return the same record carrying the given identifier
    pub fn with_id(self, id: StudentId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
