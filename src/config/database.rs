//! Database configuration module.
//!
//! Handles the `SQLite` connection and creates every table from the `SeaORM`
//! entity definitions with `Schema::create_table_from_entity`, so the schema
//! always matches the Rust structs.

use crate::entities::{
    Client, Deliverable, ProgressPayment, Project, RetroplanningTask, SystemState,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/agency_desk.sqlite?mode=rwc";

/// Gets the database URL from `DATABASE_URL` or returns the default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Connects to the database named by [`get_database_url`].
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    info!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table_for<E>(db: &DatabaseConnection, schema: &Schema, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    debug!("Ensured table {}", entity.table_name());
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Parents are created before children so foreign keys resolve.
///
/// # Errors
/// Returns an error if a statement fails.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table_for(db, &schema, Client).await?;
    create_table_for(db, &schema, Project).await?;
    create_table_for(db, &schema, ProgressPayment).await?;
    create_table_for(db, &schema, Deliverable).await?;
    create_table_for(db, &schema, RetroplanningTask).await?;
    create_table_for(db, &schema, SystemState).await?;

    Ok(())
}
