//! # HTTP Server Module
//!
//! The JSON-over-HTTP surface of the student service.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /mahasiswa` - List every record
//! - `POST /mahasiswa` - Create a record
//! - `GET /mahasiswa/:id` - Fetch one record by id
//! - `PUT /mahasiswa/:id` - Replace one record by id
//! - `DELETE /mahasiswa/:id` - Delete one record, keyed by `nim`

pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod student_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use student_routes::{student_routes, StudentState};
