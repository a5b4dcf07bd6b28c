//! # In-Memory Student Store
//!
//! Holds records in insertion order behind a `RwLock`. Used for local
//! development (`store.backend = "memory"`) and in tests.

use std::sync::RwLock;

use async_trait::async_trait;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::{StudentStore, UpdateOutcome};
use crate::student::{Student, StudentId};

/// Process-local [`StudentStore`]
#[derive(Debug, Default)]
pub struct InMemoryStudentStore {
    records: RwLock<Vec<Student>>,
}

impl InMemoryStudentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub fn len(&self) -> StoreResult<usize> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl StudentStore for InMemoryStudentStore {
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Student>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Student>> {
        let records = self.records.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(records.iter().find(|r| filter.matches(r)).cloned())
    }

    async fn insert_one(&self, student: &Student) -> StoreResult<StudentId> {
        let id = StudentId::generate();
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;
        records.push(student.clone().with_id(id));
        Ok(id)
    }

    async fn update_one(
        &self,
        filter: &Filter,
        replacement: &Student,
    ) -> StoreResult<UpdateOutcome> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;

        let Some(record) = records.iter_mut().find(|r| filter.matches(r)) else {
            return Ok(UpdateOutcome::default());
        };

        let changed = record.nim != replacement.nim
            || record.name != replacement.name
            || record.major != replacement.major;

        record.nim.clone_from(&replacement.nim);
        record.name.clone_from(&replacement.name);
        record.major.clone_from(&replacement.major);

        Ok(UpdateOutcome {
            matched: 1,
            modified: u64::from(changed),
        })
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64> {
        let mut records = self.records.write().map_err(|_| StoreError::LockPoisoned)?;

        match records.iter().position(|r| filter.matches(r)) {
            Some(idx) => {
                records.remove(idx);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn shutdown(&self) {}
}
