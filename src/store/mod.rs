//! # Student Store
//!
//! The document-store port consumed by the HTTP handlers, plus its adapters:
//!
//! - [`MongoStudentStore`] - the production store, one MongoDB collection
//! - [`InMemoryStudentStore`] - a process-local store for development and tests
//!
//! Each operation maps one-to-one onto a single collection call. Nothing here
//! retries, batches or caches.

mod errors;
mod filter;
mod memory;
mod mongo;

pub use errors::{StoreError, StoreResult};
pub use filter::Filter;
pub use memory::InMemoryStudentStore;
pub use mongo::{MongoStoreSettings, MongoStudentStore};

use async_trait::async_trait;

use crate::student::{Student, StudentId};

/// Counts reported by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    /// Documents matched by the filter
    pub matched: u64,
    /// Documents actually changed
    pub modified: u64,
}

/// Document-store operations over the student collection
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records matching the filter
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Student>>;

    /// First record matching the filter, if any
    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Student>>;

    /// Insert a record and return the identifier the store assigned.
    ///
    /// Any identifier already carried by `student` is ignored.
    async fn insert_one(&self, student: &Student) -> StoreResult<StudentId>;

    /// Overwrite `nim`, `name` and `major` of the first matching record.
    ///
    /// The identifier of `replacement` is never written.
    async fn update_one(&self, filter: &Filter, replacement: &Student)
        -> StoreResult<UpdateOutcome>;

    /// Delete the first matching record, returning how many were removed
    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64>;

    /// Check that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    /// Release the backend connection
    async fn shutdown(&self);
}
