//! Application services — availability, booking, and catalog use-cases.

pub mod availability_service;
pub mod booking_service;
pub mod catalog_service;
