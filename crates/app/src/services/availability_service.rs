//! Availability service — resolves which catalog slots are occupied.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use minibook_domain::booking::Booking;
use minibook_domain::error::{InvalidArgumentError, MiniBookError};
use minibook_domain::id::AreaId;
use minibook_domain::slot::{SlotCatalog, TimeSlot};

use crate::ports::BookingRepository;

/// Application service answering "which slots are taken?" for an area/date.
///
/// Purely derived from stored bookings; holds no state of its own and is
/// safe to call concurrently and repeatedly.
pub struct AvailabilityService<R> {
    repo: R,
    catalog: SlotCatalog,
}

impl<R: BookingRepository> AvailabilityService<R> {
    /// Create a new service backed by the given repository and catalog.
    pub fn new(repo: R, catalog: SlotCatalog) -> Self {
        Self { repo, catalog }
    }

    /// Ordered catalog labels for `area`, for rendering a slot grid.
    #[must_use]
    pub fn slot_labels(&self, area: AreaId) -> Vec<String> {
        self.catalog
            .slots_for(area)
            .iter()
            .map(TimeSlot::label)
            .collect()
    }

    /// The set of slots held by active bookings in `area` on `date`.
    ///
    /// Resolved from a single read of the day's active bookings. A booking
    /// whose stored label does not normalize is excluded and logged, never
    /// propagated as a failure.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn occupied_slots(
        &self,
        area: AreaId,
        date: NaiveDate,
    ) -> Result<BTreeSet<TimeSlot>, MiniBookError> {
        let bookings = self.repo.find_active(area, date).await?;
        Ok(occupied_set(&bookings))
    }

    /// Occupied slots as canonical labels, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn occupied_labels(
        &self,
        area: AreaId,
        date: NaiveDate,
    ) -> Result<Vec<String>, MiniBookError> {
        Ok(self
            .occupied_slots(area, date)
            .await?
            .iter()
            .map(TimeSlot::label)
            .collect())
    }

    /// Whether `label` names a catalog slot that no active booking holds.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] when the label is
    /// malformed or not in the catalog, or a storage error from the
    /// repository.
    pub async fn is_slot_free(
        &self,
        area: AreaId,
        date: NaiveDate,
        label: &str,
    ) -> Result<bool, MiniBookError> {
        let slot = TimeSlot::parse_label(label)?;
        if !self.catalog.contains(area, slot) {
            return Err(InvalidArgumentError::UnknownSlot(label.to_string()).into());
        }
        Ok(self.repo.find_active_at(area, date, slot).await?.is_none())
    }

    /// Active bookings for an area on a date, for an admin day view.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn bookings_for_day(
        &self,
        area: AreaId,
        date: NaiveDate,
    ) -> Result<Vec<Booking>, MiniBookError> {
        self.repo.find_active(area, date).await
    }
}

/// Normalize a day's active bookings into the occupied-slot set.
///
/// A booking with an unparseable stored label is skipped with a
/// data-integrity warning.
#[must_use]
pub fn occupied_set(bookings: &[Booking]) -> BTreeSet<TimeSlot> {
    let mut occupied = BTreeSet::new();
    for booking in bookings {
        match booking.time_slot() {
            Ok(slot) => {
                occupied.insert(slot);
            }
            Err(_) => {
                tracing::warn!(
                    booking = %booking.id,
                    slot_label = %booking.slot_label,
                    "skipping booking with malformed slot label"
                );
            }
        }
    }
    occupied
}
