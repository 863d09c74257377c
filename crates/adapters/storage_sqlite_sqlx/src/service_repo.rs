//! `SQLite` implementation of [`ServiceRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use minibook_app::ports::ServiceRepository;
use minibook_domain::error::MiniBookError;
use minibook_domain::id::{AreaId, ServiceId};
use minibook_domain::service::Service;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Service`]s.
struct Wrapper(Service);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Service> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let area_id: String = row.try_get("area_id")?;
        let title: String = row.try_get("title")?;
        let subtitle: Option<String> = row.try_get("subtitle")?;
        let price_cents: i64 = row.try_get("price_cents")?;

        let id = ServiceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let area_id =
            AreaId::from_str(&area_id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Service {
            id,
            area_id,
            title,
            subtitle,
            price_cents,
        }))
    }
}

const INSERT: &str =
    "INSERT INTO services (id, area_id, title, subtitle, price_cents) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM services WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM services ORDER BY title";
const SELECT_BY_AREA: &str = "SELECT * FROM services WHERE area_id = ? ORDER BY title";

/// `SQLite`-backed service repository.
pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ServiceRepository for SqliteServiceRepository {
    fn create(
        &self,
        service: Service,
    ) -> impl Future<Output = Result<Service, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(service.id.to_string())
                .bind(service.area_id.to_string())
                .bind(&service.title)
                .bind(service.subtitle.as_deref())
                .bind(service.price_cents)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(service)
        }
    }

    fn get_by_id(
        &self,
        id: ServiceId,
    ) -> impl Future<Output = Result<Option<Service>, MiniBookError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Service>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_by_area(
        &self,
        area: AreaId,
    ) -> impl Future<Output = Result<Vec<Service>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_AREA)
                .bind(area.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
