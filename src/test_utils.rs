//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    core::{
        client,
        deliverable::{self, DocumentType},
        project,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a client with no contact e-mail.
pub async fn create_test_client(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::client::Model> {
    client::create_client(db, name.to_string(), None).await
}

/// Creates a project for `client_id` with an optional quote.
pub async fn create_custom_project(
    db: &DatabaseConnection,
    client_id: i64,
    name: &str,
    quote_amount: Option<f64>,
) -> Result<entities::project::Model> {
    project::create_project(db, client_id, name.to_string(), quote_amount).await
}

/// Creates a report deliverable titled "Test deliverable".
pub async fn create_test_deliverable(
    db: &DatabaseConnection,
    client_id: i64,
    project_id: Option<i64>,
) -> Result<entities::deliverable::Model> {
    deliverable::create_deliverable(
        db,
        client_id,
        project_id,
        "Test deliverable".to_string(),
        DocumentType::Report,
    )
    .await
}

/// Sets up a database with one client and one unquoted project.
/// Returns (db, project) for common test scenarios.
pub async fn setup_with_project() -> Result<(DatabaseConnection, entities::project::Model)> {
    let db = setup_test_db().await?;
    let client = create_test_client(&db, "Test Client").await?;
    let project = create_custom_project(&db, client.id, "Test Project", None).await?;
    Ok((db, project))
}
