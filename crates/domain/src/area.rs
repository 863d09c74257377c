//! Service area — a group of services sharing one booking calendar.

use serde::{Deserialize, Serialize};

use crate::error::{InvalidArgumentError, MiniBookError};
use crate::id::AreaId;

/// A group of services and workers booked against a single calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceArea {
    pub id: AreaId,
    pub name: String,
}

impl ServiceArea {
    /// Create a builder for constructing a [`ServiceArea`].
    #[must_use]
    pub fn builder() -> ServiceAreaBuilder {
        ServiceAreaBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] when `name` is empty.
    pub fn validate(&self) -> Result<(), MiniBookError> {
        if self.name.is_empty() {
            return Err(InvalidArgumentError::EmptyName.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`ServiceArea`].
#[derive(Debug, Default)]
pub struct ServiceAreaBuilder {
    id: Option<AreaId>,
    name: Option<String>,
}

impl ServiceAreaBuilder {
    #[must_use]
    pub fn id(mut self, id: AreaId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Consume the builder, validate, and return a [`ServiceArea`].
    ///
    /// # Errors
    ///
    /// Returns [`MiniBookError::InvalidArgument`] if `name` is missing or
    /// empty.
    pub fn build(self) -> Result<ServiceArea, MiniBookError> {
        let area = ServiceArea {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
        };
        area.validate()?;
        Ok(area)
    }
}
