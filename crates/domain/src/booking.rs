//! Booking — a client's claim on one slot of an area's calendar for a date.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgumentError, MiniBookError};
use crate::id::{AreaId, BookingId, ClientId, ServiceId};
use crate::slot::TimeSlot;
use crate::time::Timestamp;

/// Lifecycle state of a booking.
///
/// Cancellation is terminal; history is preserved through state, never
/// through deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingState {
    #[default]
    Active,
    Cancelled,
}

impl BookingState {
    /// Whether this booking counts toward occupancy and conflict checks.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

impl FromStr for BookingState {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(InvalidArgumentError::UnknownState(other.to_string())),
        }
    }
}

/// A client's booking of a service slot.
///
/// `slot_label` is kept exactly as stored; legacy rows may carry
/// non-canonical labels. [`Booking::time_slot`] normalizes on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub area_id: AreaId,
    pub date: NaiveDate,
    pub slot_label: String,
    pub state: BookingState,
    pub created_at: Timestamp,
}

impl Booking {
    /// Create a builder for constructing a [`Booking`].
    #[must_use]
    pub fn builder() -> BookingBuilder {
        BookingBuilder::default()
    }

    /// The stored slot label normalized to a [`TimeSlot`].
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::MalformedSlot`] for legacy rows whose
    /// label does not normalize.
    pub fn time_slot(&self) -> Result<TimeSlot, InvalidArgumentError> {
        TimeSlot::parse_label(&self.slot_label)
    }

    /// Whether this booking counts toward occupancy and conflict checks.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}

/// Step-by-step builder for [`Booking`].
///
/// New bookings always start `active` with a canonical slot label.
#[derive(Debug, Default)]
pub struct BookingBuilder {
    id: Option<BookingId>,
    client_id: Option<ClientId>,
    service_id: Option<ServiceId>,
    area_id: Option<AreaId>,
    date: Option<NaiveDate>,
    slot: Option<TimeSlot>,
    created_at: Option<Timestamp>,
}

impl BookingBuilder {
    #[must_use]
    pub fn id(mut self, id: BookingId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn client_id(mut self, client_id: ClientId) -> Self {
        self.client_id = Some(client_id);
        self
    }

    #[must_use]
    pub fn service_id(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    #[must_use]
    pub fn area_id(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    #[must_use]
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    #[must_use]
    pub fn slot(mut self, slot: TimeSlot) -> Self {
        self.slot = Some(slot);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder and return an active [`Booking`].
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] when a required field is
    /// missing.
    pub fn build(self) -> Result<Booking, MiniBookError> {
        Ok(Booking {
            id: self.id.unwrap_or_default(),
            client_id: self
                .client_id
                .ok_or(InvalidArgumentError::MissingField("client_id"))?,
            service_id: self
                .service_id
                .ok_or(InvalidArgumentError::MissingField("service_id"))?,
            area_id: self
                .area_id
                .ok_or(InvalidArgumentError::MissingField("area_id"))?,
            date: self.date.ok_or(InvalidArgumentError::MissingField("date"))?,
            slot_label: self
                .slot
                .ok_or(InvalidArgumentError::MissingField("slot"))?
                .label(),
            state: BookingState::Active,
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_builder() -> BookingBuilder {
        Booking::builder()
            .client_id(ClientId::new())
            .service_id(ServiceId::new())
            .area_id(AreaId::new())
            .date(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .slot(TimeSlot::parse_label("09:00-10:00").unwrap())
    }

    #[test]
    fn should_build_active_booking_with_canonical_label() {
        let booking = valid_builder().build().unwrap();
        assert_eq!(booking.state, BookingState::Active);
        assert_eq!(booking.slot_label, "09:00-10:00");
        assert!(booking.is_active());
    }

    #[test]
    fn should_canonicalize_unpadded_slot_through_builder() {
        let booking = valid_builder()
            .slot(TimeSlot::parse_label("9:00-10:00").unwrap())
            .build()
            .unwrap();
        assert_eq!(booking.slot_label, "09:00-10:00");
    }

    #[test]
    fn should_reject_build_when_client_missing() {
        let result = Booking::builder()
            .service_id(ServiceId::new())
            .area_id(AreaId::new())
            .date(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .slot(TimeSlot::parse_label("09:00-10:00").unwrap())
            .build();
        assert!(matches!(
            result,
            Err(MiniBookError::InvalidArgument(
                InvalidArgumentError::MissingField("client_id")
            ))
        ));
    }

    #[test]
    fn should_reject_build_when_slot_missing() {
        let result = Booking::builder()
            .client_id(ClientId::new())
            .service_id(ServiceId::new())
            .area_id(AreaId::new())
            .date(NaiveDate::from_ymd_opt(2025, 6, 10).unwrap())
            .build();
        assert!(matches!(
            result,
            Err(MiniBookError::InvalidArgument(
                InvalidArgumentError::MissingField("slot")
            ))
        ));
    }

    #[test]
    fn should_normalize_stored_label_through_time_slot() {
        let mut booking = valid_builder().build().unwrap();
        booking.slot_label = "9:00-10:00".to_string();
        let slot = booking.time_slot().unwrap();
        assert_eq!(slot.label(), "09:00-10:00");
    }

    #[test]
    fn should_report_malformed_stored_label() {
        let mut booking = valid_builder().build().unwrap();
        booking.slot_label = "whenever".to_string();
        assert!(booking.time_slot().is_err());
    }

    #[test]
    fn should_report_cancelled_booking_as_inactive() {
        let mut booking = valid_builder().build().unwrap();
        booking.state = BookingState::Cancelled;
        assert!(!booking.is_active());
    }

    #[test]
    fn should_roundtrip_state_through_display_and_from_str() {
        assert_eq!(
            "active".parse::<BookingState>().unwrap(),
            BookingState::Active
        );
        assert_eq!(
            "cancelled".parse::<BookingState>().unwrap(),
            BookingState::Cancelled
        );
        assert_eq!(BookingState::Active.to_string(), "active");
        assert_eq!(BookingState::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn should_reject_unknown_state_text() {
        let result = "abonado".parse::<BookingState>();
        assert!(matches!(
            result,
            Err(InvalidArgumentError::UnknownState(_))
        ));
    }

    #[test]
    fn should_roundtrip_booking_through_serde_json() {
        let booking = valid_builder().build().unwrap();
        let json = serde_json::to_string(&booking).unwrap();
        let parsed: Booking = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, booking.id);
        assert_eq!(parsed.slot_label, booking.slot_label);
        assert_eq!(parsed.state, booking.state);
    }
}
