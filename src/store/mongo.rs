//! # MongoDB Student Store
//!
//! Maps each [`StudentStore`] operation onto one call against a single
//! collection. The driver's client is pooled and shared by every request.

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::errors::{StoreError, StoreResult};
use super::filter::Filter;
use super::{StudentStore, UpdateOutcome};
use crate::student::{Student, StudentId};

/// Connection parameters for [`MongoStudentStore::connect`]
#[derive(Debug, Clone)]
pub struct MongoStoreSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    /// Bound on connecting, server selection and the startup ping
    pub connect_timeout: Duration,
}

/// Stored form of a student: the identifier lives under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StudentDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    #[serde(default)]
    nim: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    major: String,
}

impl StudentDocument {
    /// Document to insert; the store assigns `_id`
    fn for_insert(student: &Student) -> Self {
        Self {
            id: None,
            nim: student.nim.clone(),
            name: student.name.clone(),
            major: student.major.clone(),
        }
    }
}

impl From<StudentDocument> for Student {
    fn from(doc: StudentDocument) -> Self {
        Student {
            id: doc.id.map(StudentId::from),
            nim: doc.nim,
            name: doc.name,
            major: doc.major,
        }
    }
}

/// `$set` of every mutable field; `_id` is left untouched
fn replacement_update(student: &Student) -> Document {
    doc! {
        "$set": {
            "nim": student.nim.as_str(),
            "name": student.name.as_str(),
            "major": student.major.as_str(),
        }
    }
}

/// [`StudentStore`] backed by a MongoDB collection
#[derive(Debug, Clone)]
pub struct MongoStudentStore {
    client: Client,
    database: String,
    collection: Collection<StudentDocument>,
    connect_timeout: Duration,
}

impl MongoStudentStore {
    /// Open a client and verify the deployment answers a ping.
    ///
    /// Both steps are bounded by `settings.connect_timeout`.
    pub async fn connect(settings: &MongoStoreSettings) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&settings.uri)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(settings.connect_timeout);
        options.server_selection_timeout = Some(settings.connect_timeout);

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connect(e.to_string()))?;
        let collection = client
            .database(&settings.database)
            .collection::<StudentDocument>(&settings.collection);

        let store = Self {
            client,
            database: settings.database.clone(),
            collection,
            connect_timeout: settings.connect_timeout,
        };
        store.ping().await?;
        Ok(store)
    }
}

#[async_trait]
impl StudentStore for MongoStudentStore {
    async fn find(&self, filter: &Filter) -> StoreResult<Vec<Student>> {
        let cursor = self.collection.find(filter.to_document()).await?;
        let docs: Vec<StudentDocument> = cursor.try_collect().await?;
        Ok(docs.into_iter().map(Student::from).collect())
    }

    async fn find_one(&self, filter: &Filter) -> StoreResult<Option<Student>> {
        let found = self.collection.find_one(filter.to_document()).await?;
        Ok(found.map(Student::from))
    }

    async fn insert_one(&self, student: &Student) -> StoreResult<StudentId> {
        let result = self
            .collection
            .insert_one(StudentDocument::for_insert(student))
            .await?;
        result
            .inserted_id
            .as_object_id()
            .map(StudentId::from)
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn update_one(
        &self,
        filter: &Filter,
        replacement: &Student,
    ) -> StoreResult<UpdateOutcome> {
        let result = self
            .collection
            .update_one(filter.to_document(), replacement_update(replacement))
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, filter: &Filter) -> StoreResult<u64> {
        let result = self.collection.delete_one(filter.to_document()).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> StoreResult<()> {
        let database = self.client.database(&self.database);
        let ping = database.run_command(doc! { "ping": 1 }).into_future();

        match tokio::time::timeout(self.connect_timeout, ping).await {
            Ok(Ok(_)) => {
                debug!(database = %self.database, "store ping ok");
                Ok(())
            }
            Ok(Err(e)) => Err(StoreError::Connect(e.to_string())),
            Err(_) => Err(StoreError::Connect(format!(
                "ping timed out after {:?}",
                self.connect_timeout
            ))),
        }
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_insert_document_omits_id() {
        let student = Student::new("123", "A", "CS").with_id(StudentId::generate());
        let document = bson::to_document(&StudentDocument::for_insert(&student)).unwrap();

        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("nim").unwrap(), "123");
        assert_eq!(document.get_str("name").unwrap(), "A");
        assert_eq!(document.get_str("major").unwrap(), "CS");
    }

    #[test]
    fn test_replacement_sets_every_field_but_id() {
        let student = Student::new("9", "B", "EE").with_id(StudentId::generate());
        let update = replacement_update(&student);

        let set = update.get_document("$set").unwrap();
        let mut keys: Vec<_> = set.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["major", "name", "nim"]);
        assert_eq!(set.get_str("nim").unwrap(), "9");
    }

    #[test]
    fn test_stored_document_decodes_to_student() {
        let oid = ObjectId::new();
        let document = doc! { "_id": oid, "nim": "1", "name": "Ana", "major": "CS" };

        let decoded: StudentDocument = bson::from_document(document).unwrap();
        let student = Student::from(decoded);

        assert_eq!(student, Student::new("1", "Ana", "CS").with_id(StudentId::from(oid)));
    }

    #[test]
    fn test_stored_document_with_missing_fields() {
        let oid = ObjectId::new();
        let decoded: StudentDocument = bson::from_document(doc! { "_id": oid }).unwrap();
        assert_eq!(decoded.nim, "");
        assert_eq!(decoded.id, Some(oid));
    }
}
