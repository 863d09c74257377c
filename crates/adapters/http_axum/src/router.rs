//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api` and includes a [`TraceLayer`] that
/// logs each HTTP request/response at the `DEBUG` level using the
/// `tracing` ecosystem.
pub fn build<BR, AR, SR>(state: AppState<BR, AR, SR>) -> Router
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", crate::api::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use minibook_app::services::availability_service::AvailabilityService;
    use minibook_app::services::booking_service::BookingService;
    use minibook_app::services::catalog_service::CatalogService;
    use minibook_domain::area::ServiceArea;
    use minibook_domain::booking::{Booking, BookingState};
    use minibook_domain::error::{MiniBookError, NotFoundError};
    use minibook_domain::id::{AreaId, BookingId, ServiceId};
    use minibook_domain::service::Service;
    use minibook_domain::slot::{SlotCatalog, TimeSlot};
    use tower::ServiceExt;

    struct StubBookingRepo;
    struct StubAreaRepo;
    struct StubServiceRepo;

    impl BookingRepository for StubBookingRepo {
        async fn create(&self, booking: Booking) -> Result<Booking, MiniBookError> {
            Ok(booking)
        }
        async fn get_by_id(&self, _id: BookingId) -> Result<Option<Booking>, MiniBookError> {
            Ok(None)
        }
        async fn find_active(
            &self,
            _area: AreaId,
            _date: NaiveDate,
        ) -> Result<Vec<Booking>, MiniBookError> {
            Ok(vec![])
        }
        async fn find_active_at(
            &self,
            _area: AreaId,
            _date: NaiveDate,
            _slot: TimeSlot,
        ) -> Result<Option<Booking>, MiniBookError> {
            Ok(None)
        }
        async fn update(&self, booking: Booking) -> Result<Booking, MiniBookError> {
            Ok(booking)
        }
        async fn set_state(
            &self,
            id: BookingId,
            _state: BookingState,
        ) -> Result<Booking, MiniBookError> {
            Err(NotFoundError {
                entity: "Booking",
                id: id.to_string(),
            }
            .into())
        }
    }

    impl AreaRepository for StubAreaRepo {
        async fn create(&self, area: ServiceArea) -> Result<ServiceArea, MiniBookError> {
            Ok(area)
        }
        async fn get_by_id(&self, _id: AreaId) -> Result<Option<ServiceArea>, MiniBookError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<ServiceArea>, MiniBookError> {
            Ok(vec![])
        }
    }

    impl ServiceRepository for StubServiceRepo {
        async fn create(&self, service: Service) -> Result<Service, MiniBookError> {
            Ok(service)
        }
        async fn get_by_id(&self, _id: ServiceId) -> Result<Option<Service>, MiniBookError> {
            Ok(None)
        }
        async fn get_all(&self) -> Result<Vec<Service>, MiniBookError> {
            Ok(vec![])
        }
        async fn find_by_area(&self, _area: AreaId) -> Result<Vec<Service>, MiniBookError> {
            Ok(vec![])
        }
    }

    fn test_state() -> AppState<StubBookingRepo, StubAreaRepo, StubServiceRepo> {
        AppState::new(
            BookingService::new(StubBookingRepo, StubServiceRepo, SlotCatalog::default()),
            AvailabilityService::new(StubBookingRepo, SlotCatalog::default()),
            CatalogService::new(StubAreaRepo, StubServiceRepo),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_area_availability() {
        let app = build(test_state());
        let area = AreaId::new();

        let response = app
            .oneshot(
                Request::builder()
                    .uri(format!("/api/areas/{area}/availability?date=2099-06-10"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_bad_request_for_malformed_area_id() {
        let app = build(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/areas/not-a-uuid/slots")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
