//! Service — a bookable offering within a service area.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgumentError, MiniBookError};
use crate::id::{AreaId, ServiceId};

/// A bookable offering, belonging to exactly one service area.
///
/// Bookings reference services by identifier; display fields stay here and
/// may be denormalized into read views by external consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub area_id: AreaId,
    pub title: String,
    pub subtitle: Option<String>,
    pub price_cents: i64,
}

impl Service {
    /// Create a builder for constructing a [`Service`].
    #[must_use]
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] when `title` is empty or
    /// the price is negative.
    pub fn validate(&self) -> Result<(), MiniBookError> {
        if self.title.is_empty() {
            return Err(InvalidArgumentError::EmptyTitle.into());
        }
        if self.price_cents < 0 {
            return Err(InvalidArgumentError::NegativePrice.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Service`].
#[derive(Debug, Default)]
pub struct ServiceBuilder {
    id: Option<ServiceId>,
    area_id: Option<AreaId>,
    title: Option<String>,
    subtitle: Option<String>,
    price_cents: Option<i64>,
}

impl ServiceBuilder {
    #[must_use]
    pub fn id(mut self, id: ServiceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn area_id(mut self, area_id: AreaId) -> Self {
        self.area_id = Some(area_id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    /// Consume the builder, validate, and return a [`Service`].
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] if the area reference is
    /// missing, the title is missing or empty, or the price is negative.
    pub fn build(self) -> Result<Service, MiniBookError> {
        let service = Service {
            id: self.id.unwrap_or_default(),
            area_id: self
                .area_id
                .ok_or(InvalidArgumentError::MissingField("area_id"))?,
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            price_cents: self.price_cents.unwrap_or_default(),
        };
        service.validate()?;
        Ok(service)
    }
}
