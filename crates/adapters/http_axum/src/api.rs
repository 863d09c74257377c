//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod areas;
#[allow(clippy::missing_errors_doc)]
pub mod availability;
#[allow(clippy::missing_errors_doc)]
pub mod bookings;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use std::str::FromStr;

use axum::Router;
use axum::routing::get;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_domain::error::InvalidArgumentError;

use crate::error::ApiError;
use crate::state::AppState;

/// Parse a UUID-backed identifier from path or payload text.
pub(crate) fn parse_id<T: FromStr>(value: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::from(InvalidArgumentError::MalformedId(value.to_string())))
}

/// Build the `/api` sub-router.
pub fn routes<BR, AR, SR>() -> Router<AppState<BR, AR, SR>>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    Router::new()
        // Areas
        .route(
            "/areas",
            get(areas::list::<BR, AR, SR>).post(areas::create::<BR, AR, SR>),
        )
        .route("/areas/{id}", get(areas::get::<BR, AR, SR>))
        .route("/areas/{id}/slots", get(availability::slots::<BR, AR, SR>))
        .route(
            "/areas/{id}/availability",
            get(availability::availability::<BR, AR, SR>),
        )
        .route(
            "/areas/{id}/bookings",
            get(availability::day_bookings::<BR, AR, SR>),
        )
        // Services
        .route(
            "/services",
            get(services::list::<BR, AR, SR>).post(services::create::<BR, AR, SR>),
        )
        .route("/services/{id}", get(services::get::<BR, AR, SR>))
        // Bookings
        .route("/bookings", axum::routing::post(bookings::create::<BR, AR, SR>))
        .route(
            "/bookings/{id}",
            get(bookings::get::<BR, AR, SR>)
                .put(bookings::reschedule::<BR, AR, SR>)
                .delete(bookings::cancel::<BR, AR, SR>),
        )
}
