//! Backend API boundary.
//!
//! `Backend` is the seam between the workflows and the remote server;
//! `ApiClient` is the reqwest implementation, `MockBackend` the test
//! double. All business logic (OCR, VAT math, persistence, restore
//! deduplication) lives behind this boundary.

pub mod backend;
pub mod client;

pub use backend::{Backend, MockBackend};
pub use client::ApiClient;
