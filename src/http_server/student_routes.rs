//! Student HTTP Routes
//!
//! The five CRUD handlers. Each one performs exactly one store call under
//! its own timeout and translates the outcome to a response.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::errors::{ApiError, ApiResult};
use crate::store::{Filter, StoreResult, StudentStore};
use crate::student::{Student, StudentId};

// ==================
// Shared State
// ==================

/// State shared across the student handlers
pub struct StudentState {
    store: Arc<dyn StudentStore>,
    request_timeout: Duration,
}

impl StudentState {
    pub fn new(store: Arc<dyn StudentStore>, request_timeout: Duration) -> Self {
        Self {
            store,
            request_timeout,
        }
    }

    /// Run one store call, aborting it once the request timeout elapses
    async fn bounded<T>(&self, op: impl Future<Output = StoreResult<T>>) -> ApiResult<T> {
        match tokio::time::timeout(self.request_timeout, op).await {
            Ok(result) => result.map_err(ApiError::from),
            Err(_) => Err(ApiError::Timeout(self.request_timeout)),
        }
    }
}

/// Create student routes
pub fn student_routes(state: Arc<StudentState>) -> Router {
    Router::new()
        .route("/mahasiswa", get(list_students).post(create_student))
        .route(
            "/mahasiswa/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
}

fn decode_student(body: &Bytes) -> ApiResult<Student> {
    serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

// ==================
// Handlers
// ==================

/// GET /mahasiswa
async fn list_students(State(state): State<Arc<StudentState>>) -> ApiResult<Json<Vec<Student>>> {
    let students = state.bounded(state.store.find(&Filter::All)).await?;
    Ok(Json(students))
}

/// GET /mahasiswa/:id
///
/// Any failed lookup, including a store error or timeout, answers 404 with
/// the cause as the body.
async fn get_student(
    State(state): State<Arc<StudentState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Student>> {
    let id = StudentId::parse(&id)?;

    state
        .bounded(state.store.find_one(&Filter::ById(id)))
        .await
        .map_err(ApiError::into_lookup_failure)?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// POST /mahasiswa
///
/// Responds 200 with the input plus its generated id.
async fn create_student(
    State(state): State<Arc<StudentState>>,
    body: Bytes,
) -> ApiResult<Json<Student>> {
    let student = decode_student(&body)?;

    let id = state.bounded(state.store.insert_one(&student)).await?;
    debug!(id = %id, nim = %student.nim, "student created");

    Ok(Json(student.with_id(id)))
}

/// PUT /mahasiswa/:id
///
/// Full replacement of `nim`, `name` and `major`. The path id wins over any
/// id in the body. An id that matches nothing still answers 200.
async fn update_student(
    State(state): State<Arc<StudentState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<Student>> {
    let id = StudentId::parse(&id)?;
    let student = decode_student(&body)?;

    let outcome = state
        .bounded(state.store.update_one(&Filter::ById(id), &student))
        .await?;
    debug!(
        id = %id,
        matched = outcome.matched,
        modified = outcome.modified,
        "student updated"
    );

    Ok(Json(student.with_id(id)))
}

/// DELETE /mahasiswa/:id
///
/// The routed segment is matched against `nim`, not the document id.
async fn delete_student(
    State(state): State<Arc<StudentState>>,
    Path(nim): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .bounded(state.store.delete_one(&Filter::ByNim(nim)))
        .await?;

    if deleted == 0 {
        return Err(ApiError::NothingToDelete);
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStudentStore;

    #[test]
    fn test_decode_student_rejects_malformed_json() {
        let err = decode_student(&Bytes::from_static(b"{\"nim\":")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_decode_student_rejects_wrong_types() {
        let err = decode_student(&Bytes::from_static(b"{\"nim\": 42}")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidBody(_)));
    }

    #[test]
    fn test_decode_student() {
        let student =
            decode_student(&Bytes::from_static(br#"{"nim":"1","name":"A","major":"CS"}"#))
                .unwrap();
        assert_eq!(student, Student::new("1", "A", "CS"));
    }

    #[tokio::test]
    async fn test_bounded_times_out() {
        let state = StudentState::new(
            Arc::new(InMemoryStudentStore::new()),
            Duration::from_millis(10),
        );

        let slow = async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        };

        let err = state.bounded(slow).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_router_dispatches_list() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        let store = Arc::new(InMemoryStudentStore::new());
        store.insert_one(&Student::new("1", "A", "CS")).await.unwrap();
        let router = student_routes(Arc::new(StudentState::new(store, Duration::from_secs(5))));

        let response = router
            .oneshot(Request::builder().uri("/mahasiswa").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let students: Vec<Student> = serde_json::from_slice(&body).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].nim, "1");
    }
}
