//! Booking service — validates candidates and drives the booking lifecycle.
//!
//! Every write path (create, reschedule, cancel) funnels through the same
//! normalization routine and ordered conflict checks. The pre-write checks
//! exist for responsiveness; the storage layer's uniqueness constraint is
//! the authority on the one-active-booking-per-slot invariant, and its
//! violations surface here as [`MiniBookError::Conflict`].

use chrono::NaiveDate;

use minibook_domain::booking::{Booking, BookingState};
use minibook_domain::error::{
    ConflictError, InvalidArgumentError, MiniBookError, NotFoundError,
};
use minibook_domain::id::{AreaId, BookingId, ClientId, ServiceId};
use minibook_domain::slot::{SlotCatalog, TimeSlot};
use minibook_domain::time;

use crate::ports::{BookingRepository, ServiceRepository};

/// A booking request as submitted by a caller, before validation.
#[derive(Debug, Clone)]
pub struct BookingCandidate {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    /// Civil date as submitted, `YYYY-MM-DD`.
    pub date: String,
    /// Slot label as submitted; normalized during validation.
    pub slot: String,
}

/// Changes applied by a reschedule; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct RescheduleRequest {
    pub service_id: Option<ServiceId>,
    pub date: Option<String>,
    pub slot: Option<String>,
}

/// A candidate that passed normalization: parsed date, catalog slot, area
/// resolved from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCandidate {
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub area_id: AreaId,
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// Application service for the booking lifecycle.
pub struct BookingService<BR, SR> {
    bookings: BR,
    services: SR,
    catalog: SlotCatalog,
}

impl<BR: BookingRepository, SR: ServiceRepository> BookingService<BR, SR> {
    /// Create a new service backed by the given repositories and catalog.
    pub fn new(bookings: BR, services: SR, catalog: SlotCatalog) -> Self {
        Self {
            bookings,
            services,
            catalog,
        }
    }

    /// Validate and persist a new booking.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] for an unknown service,
    /// [`MiniBookError::InvalidArgument`] for a malformed date or slot, and
    /// [`MiniBookError::Conflict`] when the slot is taken or an identical
    /// active booking exists — including when the storage constraint fires
    /// after the pre-write check passed.
    pub async fn create(&self, candidate: BookingCandidate) -> Result<Booking, MiniBookError> {
        let validated = self.check(candidate, None, time::today()).await?;
        let booking = Booking::builder()
            .client_id(validated.client_id)
            .service_id(validated.service_id)
            .area_id(validated.area_id)
            .date(validated.date)
            .slot(validated.slot)
            .build()?;
        let created = self.bookings.create(booking).await?;
        tracing::info!(
            booking = %created.id,
            area = %created.area_id,
            date = %created.date,
            slot = %created.slot_label,
            "booking created"
        );
        Ok(created)
    }

    /// Re-validate and persist service/date/slot changes to an active
    /// booking. The booking's own slot never conflicts with itself.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] for an unknown booking or
    /// service, [`MiniBookError::Conflict`] when the booking is cancelled
    /// or the target slot is held by another booking, and
    /// [`MiniBookError::InvalidArgument`] for malformed new values.
    pub async fn reschedule(
        &self,
        id: BookingId,
        changes: RescheduleRequest,
    ) -> Result<Booking, MiniBookError> {
        let current = self.get(id).await?;
        if !current.is_active() {
            return Err(ConflictError::BookingCancelled(id).into());
        }

        let candidate = BookingCandidate {
            client_id: current.client_id,
            service_id: changes.service_id.unwrap_or(current.service_id),
            date: changes.date.unwrap_or_else(|| current.date.to_string()),
            slot: changes.slot.unwrap_or_else(|| current.slot_label.clone()),
        };
        let validated = self.check(candidate, Some(id), time::today()).await?;

        let updated = Booking {
            service_id: validated.service_id,
            area_id: validated.area_id,
            date: validated.date,
            slot_label: validated.slot.label(),
            ..current
        };
        let updated = self.bookings.update(updated).await?;
        tracing::info!(booking = %id, slot = %updated.slot_label, "booking rescheduled");
        Ok(updated)
    }

    /// Cancel a booking. Cancelling an already-cancelled booking is a
    /// no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] for an unknown booking, or a
    /// storage error from the repository.
    pub async fn cancel(&self, id: BookingId) -> Result<Booking, MiniBookError> {
        let current = self.get(id).await?;
        if !current.is_active() {
            return Ok(current);
        }
        let cancelled = self
            .bookings
            .set_state(id, BookingState::Cancelled)
            .await?;
        tracing::info!(booking = %id, "booking cancelled");
        Ok(cancelled)
    }

    /// Look up a booking by id.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] when no booking with `id`
    /// exists, or a storage error from the repository.
    pub async fn get(&self, id: BookingId) -> Result<Booking, MiniBookError> {
        self.bookings.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Booking",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Normalize `candidate` and run the ordered conflict checks against
    /// one consistent read of the day's active bookings.
    async fn check(
        &self,
        candidate: BookingCandidate,
        exclude: Option<BookingId>,
        today: NaiveDate,
    ) -> Result<ValidatedCandidate, MiniBookError> {
        let service = self
            .services
            .get_by_id(candidate.service_id)
            .await?
            .ok_or_else(|| NotFoundError {
                entity: "Service",
                id: candidate.service_id.to_string(),
            })?;
        let validated = normalize(&self.catalog, service.area_id, &candidate, today)?;
        let existing = self
            .bookings
            .find_active(validated.area_id, validated.date)
            .await?;
        verify_no_conflict(&existing, &validated, exclude)?;
        Ok(validated)
    }
}

/// Well-formedness: a strict calendar date no earlier than `today`, and a
/// slot label normalizing to a member of the area's catalog.
fn normalize(
    catalog: &SlotCatalog,
    area_id: AreaId,
    candidate: &BookingCandidate,
    today: NaiveDate,
) -> Result<ValidatedCandidate, MiniBookError> {
    let date = time::parse_civil_date(&candidate.date)?;
    if date < today {
        return Err(InvalidArgumentError::PastDate(date).into());
    }
    let slot = TimeSlot::parse_label(&candidate.slot)?;
    if !catalog.contains(area_id, slot) {
        return Err(InvalidArgumentError::UnknownSlot(candidate.slot.clone()).into());
    }
    Ok(ValidatedCandidate {
        client_id: candidate.client_id,
        service_id: candidate.service_id,
        area_id,
        date,
        slot,
    })
}

/// Conflict checks over the day's active bookings: the duplicate-tuple
/// idempotency guard, then slot occupancy. The booking named by `exclude`
/// never conflicts with itself. Bookings whose stored label does not
/// normalize cannot match any candidate slot.
fn verify_no_conflict(
    existing: &[Booking],
    candidate: &ValidatedCandidate,
    exclude: Option<BookingId>,
) -> Result<(), MiniBookError> {
    for booking in existing {
        if Some(booking.id) == exclude {
            continue;
        }
        let Ok(slot) = booking.time_slot() else {
            continue;
        };
        if slot != candidate.slot {
            continue;
        }
        if booking.client_id == candidate.client_id
            && booking.service_id == candidate.service_id
        {
            return Err(ConflictError::DuplicateBooking.into());
        }
        return Err(ConflictError::SlotTaken {
            date: candidate.date,
            slot: candidate.slot.label(),
        }
        .into());
    }
    Ok(())
}
