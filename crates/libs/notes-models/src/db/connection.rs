//! Database connection management and migrations.

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use super::config::DbConfig;
use crate::prelude::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Pragmas applied to every pooled connection.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> core::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(CONNECTION_PRAGMAS)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Database connection pool wrapper.
#[derive(Debug, Clone)]
pub struct DbConnection {
    /// SQLite connection pool.
    pub pool: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbConnection {
    /// Create a new database connection pool.
    ///
    /// An in-memory database lives as long as its connection, so it is served
    /// by exactly one connection that is never recycled.
    ///
    /// ```rust
    /// use notes_models::db::{config::DbConfig, connection::DbConnection};
    ///
    /// let db = DbConnection::new(&DbConfig::in_memory()).unwrap();
    /// ```
    pub fn new(config: &DbConfig) -> Result<Self> {
        let manager = ConnectionManager::<SqliteConnection>::new(&config.database_url);
        let mut builder = Pool::builder().connection_customizer(Box::new(ConnectionOptions));
        if config.is_in_memory() {
            builder = builder.max_size(1).max_lifetime(None).idle_timeout(None);
        }
        let pool = builder.build(manager)?;
        Ok(Self { pool })
    }

    /// Run pending migrations and return the connection.
    ///
    /// ```rust
    /// use notes_models::db::{config::DbConfig, connection::DbConnection};
    ///
    /// let db = DbConnection::new(&DbConfig::in_memory())
    ///     .and_then(DbConnection::setup)
    ///     .unwrap();
    /// ```
    pub fn setup(self) -> Result<Self> {
        info!("Running Database Migrations");
        {
            let conn = &mut self.pool.get()?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|err| Error::Migration(err.to_string()))?;
        }
        Ok(self)
    }
}
