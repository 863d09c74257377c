//! # minibookd — minibook daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository implementations (adapters)
//! - Construct application services, injecting repositories via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use config::Config;

use minibook_adapter_http_axum::router;
use minibook_adapter_http_axum::state::AppState;
use minibook_adapter_storage_sqlite_sqlx::{
    SqliteAreaRepository, SqliteBookingRepository, SqliteServiceRepository,
};
use minibook_app::services::availability_service::AvailabilityService;
use minibook_app::services::booking_service::BookingService;
use minibook_app::services::catalog_service::CatalogService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    let catalog = config.slot_catalog()?;

    // Database
    let db = minibook_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Repositories
    let booking_repo = SqliteBookingRepository::new(pool.clone());
    let availability_repo = SqliteBookingRepository::new(pool.clone());
    let area_repo = SqliteAreaRepository::new(pool.clone());
    let service_repo = SqliteServiceRepository::new(pool.clone());
    let catalog_repo = SqliteServiceRepository::new(pool);

    // Services
    let booking_service = BookingService::new(booking_repo, service_repo, catalog.clone());
    let availability_service = AvailabilityService::new(availability_repo, catalog);
    let catalog_service = CatalogService::new(area_repo, catalog_repo);

    // HTTP
    let state = AppState::new(booking_service, availability_service, catalog_service);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "minibookd listening");

    axum::serve(listener, app).await?;

    Ok(())
}
