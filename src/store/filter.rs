//! # Store Filters
//!
//! The three predicates the handlers use to select documents.

use mongodb::bson::{doc, Document};

use crate::student::{Student, StudentId};

/// Query predicate selecting zero or more student records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Every document in the collection
    All,
    /// The document with this identifier
    ById(StudentId),
    /// Documents whose `nim` equals this code
    ByNim(String),
}

impl Filter {
    /// Whether `student` satisfies this filter
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Filter::All => true,
            Filter::ById(id) => student.id.as_ref() == Some(id),
            Filter::ByNim(nim) => student.nim == *nim,
        }
    }

    /// Render as a MongoDB query document
    pub fn to_document(&self) -> Document {
        match self {
            Filter::All => doc! {},
            Filter::ById(id) => doc! { "_id": id.as_object_id() },
            Filter::ByNim(nim) => doc! { "nim": nim.as_str() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_matches_everything() {
        assert!(Filter::All.matches(&Student::default()));
        assert!(Filter::All.to_document().is_empty());
    }

    #[test]
    fn test_by_id_requires_assigned_id() {
        let id = StudentId::generate();
        let filter = Filter::ById(id);

        assert!(!filter.matches(&Student::new("1", "A", "CS")));
        assert!(filter.matches(&Student::new("1", "A", "CS").with_id(id)));
        assert!(!filter.matches(&Student::new("1", "A", "CS").with_id(StudentId::generate())));
    }

    #[test]
    fn test_by_id_document_uses_object_id() {
        let id = StudentId::generate();
        let document = Filter::ById(id).to_document();
        assert_eq!(document.get_object_id("_id").unwrap(), id.as_object_id());
    }

    #[test]
    fn test_by_nim() {
        let filter = Filter::ByNim("123".to_string());
        assert!(filter.matches(&Student::new("123", "A", "CS")));
        assert!(!filter.matches(&Student::new("1234", "A", "CS")));
        assert_eq!(filter.to_document().get_str("nim").unwrap(), "123");
    }
}
