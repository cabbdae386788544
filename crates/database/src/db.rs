use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Connection pool settings for the registration database
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    /// Upper bound for opening a connection and for waiting on a pooled one
    pub timeout: Duration,
    pub max_connections: u32,
}

/// Creates a database connection pool
///
/// Opening a connection and waiting for a pooled one are both bounded by
/// `settings.timeout`; statements themselves are not. A pool that cannot hand
/// out a connection in time surfaces as [`DbErr::ConnectionAcquire`], which
/// the services report as storage being unavailable.
pub async fn create_connection(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(settings.url.clone());
    options
        .max_connections(settings.max_connections)
        .connect_timeout(settings.timeout)
        .acquire_timeout(settings.timeout)
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(options).await
}
