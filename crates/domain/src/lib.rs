//! # minibook-domain
//!
//! Pure domain model for the minibook booking system.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **ServiceAreas** (groups of services sharing one booking calendar)
//! - Define **Services** (bookable offerings, each belonging to one area)
//! - Define **TimeSlots** and the **SlotCatalog** (the fixed sequence of
//!   bookable intervals, with label normalization)
//! - Define **Bookings** (a client's claim on one slot of an area's calendar
//!   for a date) and their lifecycle state
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod area;
pub mod booking;
pub mod service;
pub mod slot;
