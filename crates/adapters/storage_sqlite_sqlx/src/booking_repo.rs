//! `SQLite` implementation of [`BookingRepository`].
//!
//! The `bookings_one_active_per_slot` partial unique index is the
//! authoritative guard against double-booking; unique violations from
//! writes are reported as conflicts, everything else as unavailability.

use std::future::Future;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use minibook_app::ports::BookingRepository;
use minibook_domain::booking::{Booking, BookingState};
use minibook_domain::error::{ConflictError, MiniBookError, NotFoundError};
use minibook_domain::id::{AreaId, BookingId, ClientId, ServiceId};
use minibook_domain::slot::TimeSlot;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Booking`]s.
///
/// `slot_label` is carried through raw: a legacy row with a non-canonical
/// label must decode, so the availability resolver can decide what to do
/// with it.
struct Wrapper(Booking);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Booking> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let decode = |err: Box<dyn std::error::Error + Send + Sync>| sqlx::Error::Decode(err);

        let id: String = row.try_get("id")?;
        let client_id: String = row.try_get("client_id")?;
        let service_id: String = row.try_get("service_id")?;
        let area_id: String = row.try_get("area_id")?;
        let date: String = row.try_get("date")?;
        let slot_label: String = row.try_get("slot_label")?;
        let state: String = row.try_get("state")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(Self(Booking {
            id: BookingId::from_str(&id).map_err(|err| decode(Box::new(err)))?,
            client_id: ClientId::from_str(&client_id).map_err(|err| decode(Box::new(err)))?,
            service_id: ServiceId::from_str(&service_id).map_err(|err| decode(Box::new(err)))?,
            area_id: AreaId::from_str(&area_id).map_err(|err| decode(Box::new(err)))?,
            date: date.parse::<NaiveDate>().map_err(|err| decode(Box::new(err)))?,
            slot_label,
            state: state
                .parse::<BookingState>()
                .map_err(|err| decode(Box::new(err)))?,
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map_err(|err| decode(Box::new(err)))?
                .with_timezone(&Utc),
        }))
    }
}

const INSERT: &str = "INSERT INTO bookings (id, client_id, service_id, area_id, date, slot_label, state, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM bookings WHERE id = ?";
const SELECT_ACTIVE: &str = "SELECT * FROM bookings WHERE area_id = ? AND date = ? AND state = 'active' ORDER BY slot_label";
const UPDATE: &str =
    "UPDATE bookings SET service_id = ?, area_id = ?, date = ?, slot_label = ? WHERE id = ?";
const SET_STATE: &str = "UPDATE bookings SET state = ? WHERE id = ?";

/// Map a write failure: a unique violation means another active booking
/// already holds the slot.
fn map_write_error(err: sqlx::Error, booking: &Booking) -> MiniBookError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => ConflictError::SlotTaken {
            date: booking.date,
            slot: booking.slot_label.clone(),
        }
        .into(),
        err => StorageError::from(err).into(),
    }
}

/// `SQLite`-backed booking repository.
pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl BookingRepository for SqliteBookingRepository {
    fn create(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(booking.id.to_string())
                .bind(booking.client_id.to_string())
                .bind(booking.service_id.to_string())
                .bind(booking.area_id.to_string())
                .bind(booking.date.to_string())
                .bind(&booking.slot_label)
                .bind(booking.state.to_string())
                .bind(booking.created_at.to_rfc3339())
                .execute(&pool)
                .await
                .map_err(|err| map_write_error(err, &booking))?;

            Ok(booking)
        }
    }

    fn get_by_id(
        &self,
        id: BookingId,
    ) -> impl Future<Output = Result<Option<Booking>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_active(
        &self,
        area: AreaId,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Vec<Booking>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ACTIVE)
                .bind(area.to_string())
                .bind(date.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_active_at(
        &self,
        area: AreaId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> impl Future<Output = Result<Option<Booking>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            // Normalized comparison happens here, not in SQL: a legacy row
            // stored as `9:00-10:00` must still match its canonical slot.
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ACTIVE)
                .bind(area.to_string())
                .bind(date.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows
                .into_iter()
                .map(|w| w.0)
                .find(|b| b.time_slot().is_ok_and(|s| s == slot)))
        }
    }

    fn update(
        &self,
        booking: Booking,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(booking.service_id.to_string())
                .bind(booking.area_id.to_string())
                .bind(booking.date.to_string())
                .bind(&booking.slot_label)
                .bind(booking.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| map_write_error(err, &booking))?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Booking",
                    id: booking.id.to_string(),
                }
                .into());
            }

            Ok(booking)
        }
    }

    fn set_state(
        &self,
        id: BookingId,
        state: BookingState,
    ) -> impl Future<Output = Result<Booking, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(SET_STATE)
                .bind(state.to_string())
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Booking",
                    id: id.to_string(),
                }
                .into());
            }

            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Wrapper::maybe(row).ok_or_else(|| {
                NotFoundError {
                    entity: "Booking",
                    id: id.to_string(),
                }
                .into()
            })
        }
    }
}
