//! Client business logic - the agency's customer records.

use crate::{
    core::cache::bump_cache_token,
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Retrieves all active clients, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_clients(db: &DatabaseConnection) -> Result<Vec<client::Model>> {
    Client::find()
        .filter(client::Column::IsDeleted.eq(false))
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active client by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_client_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<client::Model>> {
    Client::find()
        .filter(client::Column::Name.eq(name.trim()))
        .filter(client::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a client by id, deleted or not.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_client_by_id(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Option<client::Model>> {
    Client::find_by_id(client_id).one(db).await.map_err(Into::into)
}

/// Creates a client after checking the name is non-empty and not already taken.
///
/// # Errors
/// Returns [`Error::Config`] for an empty or duplicate name, or a store error.
#[instrument(skip(db))]
pub async fn create_client(
    db: &DatabaseConnection,
    name: String,
    contact_email: Option<String>,
) -> Result<client::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Client name cannot be empty".to_string(),
        });
    }
    if get_client_by_name(db, &name).await?.is_some() {
        return Err(Error::Config {
            message: format!("Client '{name}' already exists"),
        });
    }

    let txn = db.begin().await?;
    let client = client::ActiveModel {
        name: Set(name),
        contact_email: Set(contact_email.filter(|e| !e.trim().is_empty())),
        is_deleted: Set(false),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    bump_cache_token(&txn).await?;
    txn.commit().await?;

    info!("Created client '{}' ({})", client.name, client.id);
    Ok(client)
}

/// Soft-deletes a client. Its projects and deliverables are left untouched.
///
/// # Errors
/// Returns [`Error::ClientNotFound`] if no active client has this name.
pub async fn soft_delete_client(db: &DatabaseConnection, name: &str) -> Result<client::Model> {
    let existing = get_client_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ClientNotFound {
            name: name.to_string(),
        })?;

    let txn = db.begin().await?;
    let mut active_model: client::ActiveModel = existing.into();
    active_model.is_deleted = Set(true);
    let updated = active_model.update(&txn).await?;
    bump_cache_token(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_client_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_client(&db, "   ".to_string(), None).await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_create_and_find_client() -> Result<()> {
        let db = setup_test_db().await?;
        let created = create_client(
            &db,
            "  Maison Lumière ".to_string(),
            Some("hello@lumiere.fr".to_string()),
        )
        .await?;
        assert_eq!(created.name, "Maison Lumière");

        let found = get_client_by_name(&db, "Maison Lumière").await?.unwrap();
        assert_eq!(found, created);
        assert!(get_client_by_name(&db, "Unknown").await?.is_none());

        let duplicate = create_client(&db, "Maison Lumière".to_string(), None).await;
        assert!(matches!(duplicate, Err(Error::Config { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_delete_client() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_client(&db, "Zephyr").await?;
        create_test_client(&db, "Atlas").await?;

        let deleted = soft_delete_client(&db, "Zephyr").await?;
        assert!(deleted.is_deleted);

        let active = get_all_active_clients(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Atlas");
        assert!(get_client_by_id(&db, deleted.id).await?.is_some());

        let missing = soft_delete_client(&db, "Zephyr").await;
        assert!(matches!(missing, Err(Error::ClientNotFound { .. })));
        Ok(())
    }
}
