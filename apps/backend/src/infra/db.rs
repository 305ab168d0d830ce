use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database selected by the profile.
/// This function does NOT run any migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    // Build database URL from environment variables
    let database_url = db_url(profile)?;

    let mut options = ConnectOptions::new(database_url);
    if profile == DbProfile::InMemory {
        // Every pooled connection to sqlite::memory: is a distinct database;
        // a single connection keeps all queries on the same one.
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Single entrypoint used at startup: connect, then bring the schema up.
///
/// Test-oriented profiles (in-memory SQLite, the `_test` Postgres database)
/// are migrated in place because they are disposable. The production
/// database is migrated through the migration CLI, so `Prod` only connects.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;

    match profile {
        DbProfile::InMemory | DbProfile::Test => {
            migrate(&conn, MigrationCommand::Up).await?;
        }
        DbProfile::Prod => {
            info!("skipping inline migrations for production database");
        }
    }

    Ok(conn)
}
