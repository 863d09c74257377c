//! Common error types used across the workspace.
//!
//! One top-level [`MiniBookError`] with the four kinds external callers can
//! act on, each wrapping a typed sub-error. Layers convert via `#[from]`;
//! no `String` variants, so matching stays programmatic.

use chrono::NaiveDate;

use crate::id::BookingId;

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum MiniBookError {
    /// Malformed input: bad date, unknown slot label, missing field.
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgumentError),

    /// The requested write contradicts current booking state.
    #[error(transparent)]
    Conflict(#[from] ConflictError),

    /// A referenced record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The storage collaborator is unreachable or failed. Not retried by
    /// the engine; the caller owns retry policy.
    #[error("storage unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that fails well-formedness checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidArgumentError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed date `{0}`, expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("malformed slot label `{0}`, expected HH:MM-HH:MM")]
    MalformedSlot(String),

    #[error("slot `{0}` is not a bookable slot")]
    UnknownSlot(String),

    #[error("unknown booking state `{0}`")]
    UnknownState(String),

    #[error("malformed identifier `{0}`")]
    MalformedId(String),

    #[error("name must not be empty")]
    EmptyName,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("price must not be negative")]
    NegativePrice,
}

/// A write that would contradict existing booking state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    /// Another active booking already holds the slot.
    #[error("slot {slot} on {date} is already taken")]
    SlotTaken { date: NaiveDate, slot: String },

    /// An active booking with the identical (client, service, date, slot)
    /// tuple already exists; guards against double form-submits.
    #[error("an identical active booking already exists")]
    DuplicateBooking,

    /// Cancellation is terminal; the booking can no longer be changed.
    #[error("booking {0} is cancelled")]
    BookingCancelled(BookingId),
}

/// A referenced record that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} `{id}` not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
