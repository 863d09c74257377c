//! Storage port — repository traits for bookings and the service catalog.

use std::future::Future;

use chrono::NaiveDate;

use minibook_domain::area::ServiceArea;
use minibook_domain::booking::{Booking, BookingState};
use minibook_domain::error::MiniBookError;
use minibook_domain::id::{AreaId, BookingId, ServiceId};
use minibook_domain::service::Service;
use minibook_domain::slot::TimeSlot;

/// Repository for persisting and querying [`Booking`]s.
///
/// Implementations must enforce the at-most-one-active-booking-per
/// `(area, date, slot)` invariant atomically at the storage layer and
/// report violations as [`MiniBookError::Conflict`]. The validator's
/// pre-write check alone cannot close the check-to-write window between
/// two concurrent submissions.
pub trait BookingRepository {
    /// Insert a new booking.
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send;

    /// Get a booking by its unique identifier.
    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, MiniBookError>> + Send;

    /// All active bookings for an area on a date, from one consistent read.
    fn find_active(
        &self,
        area: AreaId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Booking>, MiniBookError>> + Send;

    /// The active booking holding `slot` on `date`, if any. Comparison is
    /// slot-normalized, not raw label equality.
    fn find_active_at(
        &self,
        area: AreaId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> impl Future<Output = Result<Option<Booking>, MiniBookError>> + Send;

    /// Update a booking's service/area/date/slot fields.
    fn update(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send;

    /// Set a booking's lifecycle state and return the updated booking.
    fn set_state(
        &self,
        id: BookingId,
        state: BookingState,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send;
}

/// Repository for persisting and querying [`ServiceArea`]s.
pub trait AreaRepository {
    /// Create a new area in storage.
    fn create(
        &self,
        area: ServiceArea,
    ) -> impl Future<Output = Result<ServiceArea, MiniBookError>> + Send;

    /// Get an area by its unique identifier.
    fn get_by_id(
        &self,
        id: AreaId,
    ) -> impl Future<Output = Result<Option<ServiceArea>, MiniBookError>> + Send;

    /// Get all areas.
    fn get_all(&self) -> impl Future<Output = Result<Vec<ServiceArea>, MiniBookError>> + Send;
}

/// Repository for persisting and querying [`Service`]s.
pub trait ServiceRepository {
    /// Create a new service in storage.
    fn create(
        &self,
        service: Service,
    ) -> impl Future<Output = Result<Service, MiniBookError>> + Send;

    /// Get a service by its unique identifier.
    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<Service>, MiniBookError>> + Send;

    /// Get all services.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, MiniBookError>> + Send;

    /// Get all services belonging to an area.
    fn find_by_area(
        &self,
        area: AreaId,
    ) -> impl Future<Output = Result<Vec<Service>, MiniBookError>> + Send;
}
