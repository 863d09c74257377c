//! JSON REST handlers for slot catalogs and availability queries.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_domain::booking::Booking;
use minibook_domain::id::AreaId;
use minibook_domain::time::parse_civil_date;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the availability endpoint.
#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    /// When present, answer for this single slot instead of the whole day.
    pub slot: Option<String>,
}

/// Query parameters for the day-bookings endpoint.
#[derive(Deserialize)]
pub struct DayQuery {
    pub date: String,
}

/// Occupied slots for a whole day.
#[derive(Serialize)]
pub struct OccupiedBody {
    pub date: NaiveDate,
    pub occupied: Vec<String>,
}

/// Availability of one slot.
#[derive(Serialize)]
pub struct SlotBody {
    pub date: NaiveDate,
    pub slot: String,
    pub available: bool,
}

/// Possible responses from the availability endpoint.
pub enum AvailabilityResponse {
    Occupied(Json<OccupiedBody>),
    Slot(Json<SlotBody>),
}

impl IntoResponse for AvailabilityResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Occupied(json) => json.into_response(),
            Self::Slot(json) => json.into_response(),
        }
    }
}

/// Possible responses from the slots endpoint.
pub enum SlotsResponse {
    Ok(Json<Vec<String>>),
}

impl IntoResponse for SlotsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the day-bookings endpoint.
pub enum DayBookingsResponse {
    Ok(Json<Vec<Booking>>),
}

impl IntoResponse for DayBookingsResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/areas/{id}/slots`
pub async fn slots<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
) -> Result<SlotsResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area_id: AreaId = parse_id(&id)?;
    state.catalog_service.get_area(area_id).await?;
    Ok(SlotsResponse::Ok(Json(
        state.availability_service.slot_labels(area_id),
    )))
}

/// `GET /api/areas/{id}/availability?date=YYYY-MM-DD[&slot=HH:MM-HH:MM]`
pub async fn availability<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<AvailabilityResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area_id: AreaId = parse_id(&id)?;
    state.catalog_service.get_area(area_id).await?;
    let date = parse_civil_date(&query.date)?;

    match query.slot {
        Some(label) => {
            let available = state
                .availability_service
                .is_slot_free(area_id, date, &label)
                .await?;
            Ok(AvailabilityResponse::Slot(Json(SlotBody {
                date,
                slot: label,
                available,
            })))
        }
        None => {
            let occupied = state
                .availability_service
                .occupied_labels(area_id, date)
                .await?;
            Ok(AvailabilityResponse::Occupied(Json(OccupiedBody {
                date,
                occupied,
            })))
        }
    }
}

/// `GET /api/areas/{id}/bookings?date=YYYY-MM-DD`
pub async fn day_bookings<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
    Query(query): Query<DayQuery>,
) -> Result<DayBookingsResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area_id: AreaId = parse_id(&id)?;
    state.catalog_service.get_area(area_id).await?;
    let date = parse_civil_date(&query.date)?;
    let bookings = state
        .availability_service
        .bookings_for_day(area_id, date)
        .await?;
    Ok(DayBookingsResponse::Ok(Json(bookings)))
}
