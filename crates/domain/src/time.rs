//! Time and timestamp helpers.
//!
//! The system runs in a single fixed civil timezone; UTC is that zone.
//! Calendar dates (`NaiveDate`) carry no time component.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::InvalidArgumentError;

/// UTC timestamp used for `created_at` and similar audit fields.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Civil date of the current moment.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a strict `YYYY-MM-DD` civil date.
///
/// Inputs that do not render back to the exact same text (unpadded fields,
/// trailing garbage) are rejected, not normalized.
///
/// # Errors
///
/// Returns [`InvalidArgumentError::MalformedDate`] for anything but a real
/// calendar date in canonical form.
pub fn parse_civil_date(value: &str) -> Result<NaiveDate, InvalidArgumentError> {
    let malformed = || InvalidArgumentError::MalformedDate(value.to_string());
    let parsed = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| malformed())?;
    if parsed.format("%Y-%m-%d").to_string() != value {
        return Err(malformed());
    }
    Ok(parsed)
}
