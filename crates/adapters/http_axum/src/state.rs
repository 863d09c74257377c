//! Shared application state for axum handlers.

use std::sync::Arc;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_app::services::availability_service::AvailabilityService;
use minibook_app::services::booking_service::BookingService;
use minibook_app::services::catalog_service::CatalogService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository types to avoid dynamic dispatch. `Clone` is
/// implemented manually so the underlying types themselves do not need to
/// be `Clone` — only the `Arc` wrappers are cloned.
pub struct AppState<BR, AR, SR> {
    /// Booking lifecycle service (validate, create, reschedule, cancel).
    pub booking_service: Arc<BookingService<BR, SR>>,
    /// Availability queries (occupied slots, catalog, single-slot checks).
    pub availability_service: Arc<AvailabilityService<BR>>,
    /// Area/service catalog management.
    pub catalog_service: Arc<CatalogService<AR, SR>>,
}

impl<BR, AR, SR> Clone for AppState<BR, AR, SR> {
    fn clone(&self) -> Self {
        Self {
            booking_service: Arc::clone(&self.booking_service),
            availability_service: Arc::clone(&self.availability_service),
            catalog_service: Arc::clone(&self.catalog_service),
        }
    }
}

impl<BR, AR, SR> AppState<BR, AR, SR>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        booking_service: BookingService<BR, SR>,
        availability_service: AvailabilityService<BR>,
        catalog_service: CatalogService<AR, SR>,
    ) -> Self {
        Self {
            booking_service: Arc::new(booking_service),
            availability_service: Arc::new(availability_service),
            catalog_service: Arc::new(catalog_service),
        }
    }
}
