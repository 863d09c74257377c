//! JSON REST handlers for bookings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_app::services::booking_service::{BookingCandidate, RescheduleRequest};
use minibook_domain::booking::Booking;
use minibook_domain::id::{BookingId, ClientId, ServiceId};

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for submitting a booking.
#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub client_id: String,
    pub service_id: String,
    pub date: String,
    pub slot: String,
}

/// Request body for rescheduling a booking; absent fields keep their
/// current values.
#[derive(Deserialize)]
pub struct RescheduleBookingRequest {
    pub service_id: Option<String>,
    pub date: Option<String>,
    pub slot: Option<String>,
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Booking>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Booking>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the reschedule endpoint.
pub enum RescheduleResponse {
    Ok(Json<Booking>),
}

impl IntoResponse for RescheduleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the cancel endpoint.
pub enum CancelResponse {
    NoContent,
}

impl IntoResponse for CancelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `POST /api/bookings`
pub async fn create<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<CreateResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let candidate = BookingCandidate {
        client_id: parse_id::<ClientId>(&req.client_id)?,
        service_id: parse_id::<ServiceId>(&req.service_id)?,
        date: req.date,
        slot: req.slot,
    };
    let booking = state.booking_service.create(candidate).await?;
    Ok(CreateResponse::Created(Json(booking)))
}

/// `GET /api/bookings/{id}`
pub async fn get<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let booking_id: BookingId = parse_id(&id)?;
    let booking = state.booking_service.get(booking_id).await?;
    Ok(GetResponse::Ok(Json(booking)))
}

/// `PUT /api/bookings/{id}`
pub async fn reschedule<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
    Json(req): Json<RescheduleBookingRequest>,
) -> Result<RescheduleResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let booking_id: BookingId = parse_id(&id)?;
    let changes = RescheduleRequest {
        service_id: req
            .service_id
            .as_deref()
            .map(parse_id::<ServiceId>)
            .transpose()?,
        date: req.date,
        slot: req.slot,
    };
    let booking = state.booking_service.reschedule(booking_id, changes).await?;
    Ok(RescheduleResponse::Ok(Json(booking)))
}

/// `DELETE /api/bookings/{id}`
///
/// Bookings are never hard-deleted; this transitions the booking to
/// `cancelled` and is idempotent.
pub async fn cancel<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
) -> Result<CancelResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let booking_id: BookingId = parse_id(&id)?;
    state.booking_service.cancel(booking_id).await?;
    Ok(CancelResponse::NoContent)
}
