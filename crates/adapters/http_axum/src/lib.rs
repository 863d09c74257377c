//! # minibook-adapter-http-axum
//!
//! HTTP adapter using [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON REST API: catalog listings, availability queries,
//!   booking submission/reschedule/cancellation
//! - Map domain errors to HTTP statuses with a structured error body
//! - Trace each request/response through the `tracing` ecosystem
//!
//! ## Dependency rule
//! Depends on `minibook-app` (for services and port traits) and
//! `minibook-domain` (for domain types). The `app` and `domain` crates
//! must never reference this adapter.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
