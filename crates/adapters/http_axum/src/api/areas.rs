//! JSON REST handlers for service areas.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_domain::area::ServiceArea;
use minibook_domain::id::AreaId;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating an area.
#[derive(Deserialize)]
pub struct CreateAreaRequest {
    pub name: String,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ServiceArea>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ServiceArea>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<ServiceArea>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/areas`
pub async fn list<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
) -> Result<ListResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let areas = state.catalog_service.list_areas().await?;
    Ok(ListResponse::Ok(Json(areas)))
}

/// `GET /api/areas/{id}`
pub async fn get<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area_id: AreaId = parse_id(&id)?;
    let area = state.catalog_service.get_area(area_id).await?;
    Ok(GetResponse::Ok(Json(area)))
}

/// `POST /api/areas`
pub async fn create<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Json(req): Json<CreateAreaRequest>,
) -> Result<CreateResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area = ServiceArea::builder().name(req.name).build()?;
    let created = state.catalog_service.create_area(area).await?;
    Ok(CreateResponse::Created(Json(created)))
}
