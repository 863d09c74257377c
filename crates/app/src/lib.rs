//! # minibook-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `BookingRepository` — booking persistence and day queries
//!   - `AreaRepository` — service-area catalog persistence
//!   - `ServiceRepository` — service catalog persistence
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AvailabilityService` — which slots are occupied or free per area/date
//!   - `BookingService` — validate candidates, create, reschedule, cancel
//!   - `CatalogService` — manage areas and services
//! - Orchestrate domain objects without knowing *how* persistence or IO works
//!
//! ## Dependency rule
//! Depends on `minibook-domain` only (plus `tracing` for diagnostics).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod ports;
pub mod services;
