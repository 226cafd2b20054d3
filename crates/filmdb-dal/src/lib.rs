pub mod error;
pub mod film;

pub use error::Error;
pub use sqlx::Error as SqlxError;
use sqlx::{migrate::MigrateDatabase as _, sqlite::SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Opens connection pool, database file is created if it does not exist yet
pub async fn new_pool(database_url: &str) -> Result<Pool, Error> {
    if !ChosenDB::database_exists(database_url).await? {
        ChosenDB::create_database(database_url).await?;
        info!("Created new database {database_url}");
    }
    let pool = SqlitePoolOptions::new()
        .max_connections(50)
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    info!("Database schema is up to date");
    Ok(())
}
