//! JSON REST handlers for services.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use minibook_app::ports::{AreaRepository, BookingRepository, ServiceRepository};
use minibook_domain::id::{AreaId, ServiceId};
use minibook_domain::service::Service;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a service.
#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub area_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub price_cents: Option<i64>,
}

/// Query parameters for the list endpoint.
#[derive(Deserialize)]
pub struct ListQuery {
    pub area: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Service>>),
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
    Ok(Json<Service>),
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
    Created(Json<Service>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /api/services?area=`
pub async fn list<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Query(query): Query<ListQuery>,
) -> Result<ListResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area = query
        .area
        .as_deref()
        .map(parse_id::<AreaId>)
        .transpose()?;
    let services = state.catalog_service.list_services(area).await?;
    Ok(ListResponse::Ok(Json(services)))
}

/// `GET /api/services/{id}`
pub async fn get<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let service_id: ServiceId = parse_id(&id)?;
    let service = state.catalog_service.get_service(service_id).await?;
    Ok(GetResponse::Ok(Json(service)))
}

/// `POST /api/services`
pub async fn create<BR, AR, SR>(
    State(state): State<AppState<BR, AR, SR>>,
    Json(req): Json<CreateServiceRequest>,
) -> Result<CreateResponse, ApiError>
where
    BR: BookingRepository + Send + Sync + 'static,
    AR: AreaRepository + Send + Sync + 'static,
    SR: ServiceRepository + Send + Sync + 'static,
{
    let area_id: AreaId = parse_id(&req.area_id)?;

    let mut builder = Service::builder().area_id(area_id).title(req.title);
    if let Some(subtitle) = req.subtitle {
        builder = builder.subtitle(subtitle);
    }
    if let Some(price_cents) = req.price_cents {
        builder = builder.price_cents(price_cents);
    }

    let service = builder.build()?;
    let created = state.catalog_service.create_service(service).await?;
    Ok(CreateResponse::Created(Json(created)))
}
