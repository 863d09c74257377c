//! Catalog service — use-cases for managing areas and services.

use minibook_domain::area::ServiceArea;
use minibook_domain::error::{MiniBookError, NotFoundError};
use minibook_domain::id::{AreaId, ServiceId};
use minibook_domain::service::Service;

use crate::ports::{AreaRepository, ServiceRepository};

/// Application service for the area/service catalog.
pub struct CatalogService<AR, SR> {
    areas: AR,
    services: SR,
}

impl<AR: AreaRepository, SR: ServiceRepository> CatalogService<AR, SR> {
    /// Create a new service backed by the given repositories.
    pub fn new(areas: AR, services: SR) -> Self {
        Self { areas, services }
    }

    /// Create a new area after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_area(&self, area: ServiceArea) -> Result<ServiceArea, MiniBookError> {
        area.validate()?;
        self.areas.create(area).await
    }

    /// Look up an area by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] when no area with `id` exists,
    /// or a storage error from the repository.
    pub async fn get_area(&self, id: AreaId) -> Result<ServiceArea, MiniBookError> {
        self.areas.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Area",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all areas.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_areas(&self) -> Result<Vec<ServiceArea>, MiniBookError> {
        self.areas.get_all().await
    }

    /// Create a new service after validating invariants; the referenced
    /// area must exist.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] if invariants fail,
    /// [`MiniBookError::NotFound`] for an unknown area, or a storage error
    /// from the repository.
    pub async fn create_service(&self, service: Service) -> Result<Service, MiniBookError> {
        service.validate()?;
        self.get_area(service.area_id).await?;
        self.services.create(service).await
    }

    /// Look up a service by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::NotFound`] when no service with `id`
    /// exists, or a storage error from the repository.
    pub async fn get_service(&self, id: ServiceId) -> Result<Service, MiniBookError> {
        self.services.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Service",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List services, optionally restricted to one area.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_services(
        &self,
        area: Option<AreaId>,
    ) -> Result<Vec<Service>, MiniBookError> {
        match area {
            Some(area) => self.services.find_by_area(area).await,
            None => self.services.get_all().await,
        }
    }
}
