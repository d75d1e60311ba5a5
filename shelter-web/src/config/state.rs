//! runtime state

use std::sync::Arc;
use std::time::Duration;

use super::AppConfig;
use crate::repo::sea::SeaRepo;
use crate::service::ListingConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct AppState {
    pub conn: Arc<DatabaseConnection>,
    pub listing: ListingConfig,
    /// Cancelled once the server starts shutting down; in-flight listings
    /// watch a child of it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, listing: ListingConfig) -> Self {
        Self {
            conn: Arc::new(conn),
            listing,
            shutdown: CancellationToken::new(),
        }
    }
}

pub async fn init_shared_app_state(config: &AppConfig) -> Result<AppState, DbErr> {
    let db = &config.db_config;
    let mut options = ConnectOptions::new(db.backend.connect_url());
    options
        .acquire_timeout(Duration::from_secs(db.acquire_timeout_secs))
        .sqlx_logging(false);
    if let Some(max) = db.max_connections {
        options.max_connections(max);
    }
    let conn = match Database::connect(options).await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("create db conn error: {:?}", e);
            return Err(e);
        }
    };
    tracing::debug!(backend = ?conn.get_database_backend(), "db conn initialized");
    if db.sync_schema {
        SeaRepo::create_tables(&conn).await?;
        tracing::info!("schema synchronized");
    }
    Ok(AppState::new(conn, config.listing.into()))
}
