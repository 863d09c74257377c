//! # minibook-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `minibook-app`
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Carry the one-active-booking-per-slot invariant as a partial unique
//!   index, reporting violations as conflicts
//!
//! ## Dependency rule
//! Depends on `minibook-app` (for port traits) and `minibook-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod area_repo;
pub mod booking_repo;
pub mod error;
pub mod pool;
pub mod service_repo;

pub use area_repo::SqliteAreaRepository;
pub use booking_repo::SqliteBookingRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
pub use service_repo::SqliteServiceRepository;
