use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

/// Shared connection pool.
///
/// Requests never share a session: reads go through the pool and every write
/// opens its own transaction, which is committed or rolled back before the
/// handler returns.
pub struct Database {
    pub(crate) conn: DatabaseConnection,
}

impl Database {
    /// Open or create a database at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening database at: {}", path.display());

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create database directory: {}",
                parent.display()
            ))?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(false);

        let database = Self::connect(opt)
            .await
            .context(format!("Failed to open database: {}", path.display()))?;

        log::info!("Database ready at: {}", path.display());
        Ok(database)
    }

    /// Private in-memory database.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        // A single connection, otherwise every pooled connection would get
        // its own empty database.
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        Self::connect(opt).await
    }

    async fn connect(opt: ConnectOptions) -> Result<Self> {
        let conn = SeaDatabase::connect(opt)
            .await
            .context("Failed to connect to database")?;

        // Deleting a venue or artist that still has shows must fail.
        conn.execute_unprepared("PRAGMA foreign_keys = ON")
            .await
            .context("Failed to enable foreign keys")?;

        log::debug!("Running database migrations");
        migration::Migrator::up(&conn, None)
            .await
            .context("Failed to run database migrations")?;

        Ok(Database { conn })
    }
}
