//! Project business logic - engagements, quotes and payments.
//!
//! These functions maintain the records [`crate::core::billing`] projects over.
//! Amounts are validated here, at the store boundary, since the billing
//! computation itself accepts anything.

use crate::{
    core::cache::bump_cache_token,
    entities::{ProgressPayment, Project, progress_payment, project},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Rejects negative, NaN and infinite amounts.
///
/// # Errors
/// Returns [`Error::InvalidAmount`] with the offending value.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount { amount })
    }
}

/// Retrieves all active projects, ordered alphabetically by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_all_active_projects(db: &DatabaseConnection) -> Result<Vec<project::Model>> {
    Project::find()
        .filter(project::Column::IsDeleted.eq(false))
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a client's active projects, ordered by name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_projects_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<project::Model>> {
    Project::find()
        .filter(project::Column::ClientId.eq(client_id))
        .filter(project::Column::IsDeleted.eq(false))
        .order_by_asc(project::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an active project by exact name.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_project_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<project::Model>> {
    Project::find()
        .filter(project::Column::Name.eq(name.trim()))
        .filter(project::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an active project by id. Deleted projects are reported as absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_project_by_id(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Option<project::Model>> {
    Ok(Project::find_by_id(project_id)
        .one(db)
        .await?
        .filter(|p| !p.is_deleted))
}

async fn require_project(db: &DatabaseConnection, project_id: i64) -> Result<project::Model> {
    get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| Error::ProjectNotFound {
            name: project_id.to_string(),
        })
}

/// Creates a project for an existing client.
///
/// # Errors
/// Returns an error if the name is empty or taken, the quote is invalid,
/// the client does not exist, or the store fails.
#[instrument(skip(db))]
pub async fn create_project(
    db: &DatabaseConnection,
    client_id: i64,
    name: String,
    quote_amount: Option<f64>,
) -> Result<project::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Config {
            message: "Project name cannot be empty".to_string(),
        });
    }
    let quote_amount = quote_amount.map(validate_amount).transpose()?;

    crate::core::client::get_client_by_id(db, client_id)
        .await?
        .filter(|c| !c.is_deleted)
        .ok_or_else(|| Error::ClientNotFound {
            name: client_id.to_string(),
        })?;

    if get_project_by_name(db, &name).await?.is_some() {
        return Err(Error::Config {
            message: format!("Project '{name}' already exists"),
        });
    }

    let now = Utc::now().naive_utc();
    let txn = db.begin().await?;
    let project = project::ActiveModel {
        client_id: Set(client_id),
        name: Set(name),
        quote_amount: Set(quote_amount),
        deposit_amount: Set(None),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    bump_cache_token(&txn).await?;
    txn.commit().await?;

    info!("Created project '{}' ({})", project.name, project.id);
    Ok(project)
}

/// Sets the agreed contract value. Zero means "no quote".
///
/// # Errors
/// Returns an error if the amount is invalid or the project does not exist.
pub async fn set_quote(
    db: &DatabaseConnection,
    project_id: i64,
    quote_amount: f64,
) -> Result<project::Model> {
    let quote_amount = validate_amount(quote_amount)?;
    let existing = require_project(db, project_id).await?;

    let mut active_model: project::ActiveModel = existing.into();
    active_model.quote_amount = Set(Some(quote_amount));
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Records the upfront deposit, replacing any previous value.
///
/// # Errors
/// Returns an error if the amount is invalid or the project does not exist.
pub async fn record_deposit(
    db: &DatabaseConnection,
    project_id: i64,
    deposit_amount: f64,
) -> Result<project::Model> {
    let deposit_amount = validate_amount(deposit_amount)?;
    let existing = require_project(db, project_id).await?;

    let mut active_model: project::ActiveModel = existing.into();
    active_model.deposit_amount = Set(Some(deposit_amount));
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Appends a milestone payment to the project's payment sequence.
///
/// # Errors
/// Returns an error if the amount is invalid or the project does not exist.
pub async fn add_progress_payment(
    db: &DatabaseConnection,
    project_id: i64,
    amount: f64,
) -> Result<progress_payment::Model> {
    let amount = validate_amount(amount)?;
    require_project(db, project_id).await?;

    progress_payment::ActiveModel {
        project_id: Set(project_id),
        amount: Set(amount),
        received_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Returns a project's milestone payments in the order they were recorded.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_progress_payments(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<progress_payment::Model>> {
    ProgressPayment::find()
        .filter(progress_payment::Column::ProjectId.eq(project_id))
        .order_by_asc(progress_payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Soft-deletes a project by name.
///
/// # Errors
/// Returns [`Error::ProjectNotFound`] if no active project has this name.
pub async fn soft_delete_project(db: &DatabaseConnection, name: &str) -> Result<project::Model> {
    let existing = get_project_by_name(db, name)
        .await?
        .ok_or_else(|| Error::ProjectNotFound {
            name: name.to_string(),
        })?;

    let txn = db.begin().await?;
    let mut active_model: project::ActiveModel = existing.into();
    active_model.is_deleted = Set(true);
    active_model.updated_at = Set(Utc::now().naive_utc());
    let updated = active_model.update(&txn).await?;
    bump_cache_token(&txn).await?;
    txn.commit().await?;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(0.0).unwrap(), 0.0);
        assert_eq!(validate_amount(1250.5).unwrap(), 1250.5);
        assert!(matches!(
            validate_amount(-1.0),
            Err(Error::InvalidAmount { amount }) if amount == -1.0
        ));
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    #[tokio::test]
    async fn test_create_project_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_project(&db, 1, " ".to_string(), None).await;
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = create_project(&db, 1, "Campagne".to_string(), Some(-10.0)).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));
    }

    #[tokio::test]
    async fn test_create_project_requires_client() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_project(&db, 42, "Orphan".to_string(), None).await;
        assert!(matches!(result, Err(Error::ClientNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_quote_deposit_and_payments() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        assert_eq!(project.quote_amount, None);

        let updated = set_quote(&db, project.id, 4800.0).await?;
        assert_eq!(updated.quote_amount, Some(4800.0));

        let updated = record_deposit(&db, project.id, 1000.0).await?;
        assert_eq!(updated.deposit_amount, Some(1000.0));
        let updated = record_deposit(&db, project.id, 1200.0).await?;
        assert_eq!(updated.deposit_amount, Some(1200.0));

        add_progress_payment(&db, project.id, 500.0).await?;
        add_progress_payment(&db, project.id, 250.0).await?;
        let amounts: Vec<f64> = get_progress_payments(&db, project.id)
            .await?
            .into_iter()
            .map(|p| p.amount)
            .collect();
        assert_eq!(amounts, vec![500.0, 250.0]);

        assert!(matches!(
            add_progress_payment(&db, project.id, -5.0).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            set_quote(&db, 999, 10.0).await,
            Err(Error::ProjectNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_projects_by_client_and_soft_delete() -> Result<()> {
        let db = setup_test_db().await?;
        let a = create_test_client(&db, "A").await?;
        let b = create_test_client(&db, "B").await?;
        create_custom_project(&db, a.id, "Site vitrine", Some(3000.0)).await?;
        create_custom_project(&db, a.id, "Brochure", None).await?;
        create_custom_project(&db, b.id, "Podcast", None).await?;

        let names: Vec<String> = get_projects_for_client(&db, a.id)
            .await?
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Brochure", "Site vitrine"]);

        let duplicate = create_project(&db, b.id, "Brochure".to_string(), None).await;
        assert!(matches!(duplicate, Err(Error::Config { .. })));

        let deleted = soft_delete_project(&db, "Brochure").await?;
        assert!(get_project_by_id(&db, deleted.id).await?.is_none());
        assert_eq!(get_all_active_projects(&db).await?.len(), 2);
        Ok(())
    }
}
