//! Bookable time slots and the per-area slot catalog.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidArgumentError;
use crate::id::AreaId;

/// A fixed civil-time interval eligible for booking.
///
/// Equality and ordering use the normalized start/end times, never the raw
/// label text, so `9:00-10:00` and `09:00-10:00` denote the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeSlot {
    /// Create a slot, enforcing `start < end`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::MalformedSlot`] when the interval is
    /// empty or inverted.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, InvalidArgumentError> {
        if start >= end {
            return Err(InvalidArgumentError::MalformedSlot(format!(
                "{}-{}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a `HH:MM-HH:MM` label. A missing leading zero on the hour is
    /// tolerated; anything else is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::MalformedSlot`] when the label does
    /// not normalize to a valid interval.
    pub fn parse_label(label: &str) -> Result<Self, InvalidArgumentError> {
        let malformed = || InvalidArgumentError::MalformedSlot(label.to_string());
        let (start, end) = label.trim().split_once('-').ok_or_else(malformed)?;
        let start = parse_hhmm(start).ok_or_else(malformed)?;
        let end = parse_hhmm(end).ok_or_else(malformed)?;
        Self::new(start, end).map_err(|_| malformed())
    }

    /// Start of the interval.
    #[must_use]
    pub fn start(self) -> NaiveTime {
        self.start
    }

    /// End of the interval.
    #[must_use]
    pub fn end(self) -> NaiveTime {
        self.end
    }

    /// Canonical `HH:MM-HH:MM` label.
    #[must_use]
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

impl FromStr for TimeSlot {
    type Err = InvalidArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

impl Serialize for TimeSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Self::parse_label(&label).map_err(D::Error::custom)
    }
}

/// Parse one `HH:MM` component; 1–2 digit hour, exactly 2 digit minute.
fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.trim().split_once(':')?;
    if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
        return None;
    }
    if !hour.bytes().all(|b| b.is_ascii_digit()) || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// The ordered, finite sequence of bookable slots for a service area.
///
/// One global sequence is shared by every area today; lookups still take the
/// area so per-area catalogs can be introduced without changing callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// Build a catalog from slot labels, sorting and deduplicating.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgumentError::MalformedSlot`] for any label that
    /// does not normalize.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, InvalidArgumentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slots = labels
            .into_iter()
            .map(|label| TimeSlot::parse_label(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        slots.sort_unstable();
        slots.dedup();
        Ok(Self { slots })
    }

    /// Ordered slots for `area`; re-queryable any number of times.
    #[must_use]
    pub fn slots_for(&self, _area: AreaId) -> &[TimeSlot] {
        &self.slots
    }

    /// Whether `slot` is a member of `area`'s catalog.
    #[must_use]
    pub fn contains(&self, area: AreaId, slot: TimeSlot) -> bool {
        self.slots_for(area).binary_search(&slot).is_ok()
    }

    /// Number of slots in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the catalog holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Default for SlotCatalog {
    /// The standard business day: four morning and four afternoon hours.
    fn default() -> Self {
        Self::from_labels([
            "09:00-10:00",
            "10:00-11:00",
            "11:00-12:00",
            "12:00-13:00",
            "16:00-17:00",
            "17:00-18:00",
            "18:00-19:00",
            "19:00-20:00",
        ])
        .expect("default catalog labels are canonical")
    }
}
