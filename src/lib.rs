//! mahasiswa-service - a CRUD HTTP service for student records
//!
//! Five handlers map HTTP verbs one-to-one onto document-store calls against
//! a single MongoDB collection:
//!
//! - [`student`] - the record type and its identifier
//! - [`store`] - the store port and its MongoDB / in-memory adapters
//! - [`http_server`] - routes, handlers, error responses and the listener
//! - [`cli`] - configuration and process bootstrap
//! - [`observability`] - logging setup and lifecycle events

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;
pub mod student;
