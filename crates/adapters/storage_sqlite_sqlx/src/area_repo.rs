//! `SQLite` implementation of [`AreaRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use minibook_app::ports::AreaRepository;
use minibook_domain::area::ServiceArea;
use minibook_domain::error::MiniBookError;
use minibook_domain::id::AreaId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`ServiceArea`]s.
struct Wrapper(ServiceArea);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<ServiceArea> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;

        let id = AreaId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ServiceArea { id, name }))
    }
}

const INSERT: &str = "INSERT INTO areas (id, name) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM areas WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM areas ORDER BY name";

/// `SQLite`-backed area repository.
pub struct SqliteAreaRepository {
    pool: SqlitePool,
}

impl SqliteAreaRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AreaRepository for SqliteAreaRepository {
    fn create(
        &self,
        area: ServiceArea,
    ) -> impl Future<Output = Result<ServiceArea, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(area.id.to_string())
                .bind(&area.name)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(area)
        }
    }

    fn get_by_id(
        &self,
        id: AreaId,
    ) -> impl Future<Output = Result<Option<ServiceArea>, MiniBookError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<ServiceArea>, MiniBookError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }
}
