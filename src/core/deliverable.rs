//! Deliverable business logic - billable units of creative and document work.
//!
//! Deliverables are created by users, edited through status and amount
//! updates, and never deleted by the system.

use crate::{
    core::project::validate_amount,
    entities::{Deliverable, deliverable},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

/// Lifecycle of a deliverable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliverableStatus {
    /// Needs a price
    #[serde(rename = "to_quote")]
    ToQuote,
    /// Priced, not started
    #[serde(rename = "pending")]
    Pending,
    /// Being produced
    #[serde(rename = "in-progress")]
    InProgress,
    /// Delivered
    #[serde(rename = "completed")]
    Completed,
}

impl DeliverableStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::ToQuote,
        Self::Pending,
        Self::InProgress,
        Self::Completed,
    ];

    /// Stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToQuote => "to_quote",
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for DeliverableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliverableStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s.trim())
            .ok_or_else(|| Error::Config {
                message: format!("Unknown deliverable status '{s}'"),
            })
    }
}

/// Kind of document a deliverable produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    /// Meeting report
    Report,
    /// Creative brief
    CreativeBrief,
    /// Social-media brief
    SocialBrief,
    /// Anything else
    Other,
}

impl DocumentType {
    /// Every document type.
    pub const ALL: [Self; 4] = [
        Self::Report,
        Self::CreativeBrief,
        Self::SocialBrief,
        Self::Other,
    ];

    /// Stored tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Report => "report",
            Self::CreativeBrief => "creative-brief",
            Self::SocialBrief => "social-brief",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s.trim())
            .ok_or_else(|| Error::Config {
                message: format!("Unknown document type '{s}'"),
            })
    }
}

/// Retrieves a deliverable by id.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_deliverable_by_id(
    db: &DatabaseConnection,
    deliverable_id: i64,
) -> Result<Option<deliverable::Model>> {
    Deliverable::find_by_id(deliverable_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the deliverables billed under a project, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_deliverables_for_project(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<Vec<deliverable::Model>> {
    Deliverable::find()
        .filter(deliverable::Column::ProjectId.eq(project_id))
        .order_by_asc(deliverable::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves every deliverable of a client, with or without a project.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_deliverables_for_client(
    db: &DatabaseConnection,
    client_id: i64,
) -> Result<Vec<deliverable::Model>> {
    Deliverable::find()
        .filter(deliverable::Column::ClientId.eq(client_id))
        .order_by_asc(deliverable::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a deliverable in the `to_quote` state with nothing invoiced.
///
/// When `project_id` is given the project must belong to the same client.
///
/// # Errors
/// Returns an error if the title is empty, the client or project is unknown,
/// the project belongs to another client, or the store fails.
#[instrument(skip(db))]
pub async fn create_deliverable(
    db: &DatabaseConnection,
    client_id: i64,
    project_id: Option<i64>,
    title: String,
    document_type: DocumentType,
) -> Result<deliverable::Model> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(Error::Config {
            message: "Deliverable title cannot be empty".to_string(),
        });
    }

    crate::core::client::get_client_by_id(db, client_id)
        .await?
        .ok_or_else(|| Error::ClientNotFound {
            name: client_id.to_string(),
        })?;

    if let Some(project_id) = project_id {
        let project = crate::core::project::get_project_by_id(db, project_id)
            .await?
            .ok_or_else(|| Error::ProjectNotFound {
                name: project_id.to_string(),
            })?;
        if project.client_id != client_id {
            return Err(Error::Config {
                message: format!(
                    "Project '{}' does not belong to client {client_id}",
                    project.name
                ),
            });
        }
    }

    let now = Utc::now().naive_utc();
    let created = deliverable::ActiveModel {
        client_id: Set(client_id),
        project_id: Set(project_id),
        title: Set(title),
        document_type: Set(document_type.as_str().to_string()),
        status: Set(DeliverableStatus::ToQuote.as_str().to_string()),
        total_invoiced: Set(0.0),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created deliverable '{}' ({})", created.title, created.id);
    Ok(created)
}

async fn require_deliverable(
    db: &DatabaseConnection,
    deliverable_id: i64,
) -> Result<deliverable::Model> {
    get_deliverable_by_id(db, deliverable_id)
        .await?
        .ok_or(Error::DeliverableNotFound { id: deliverable_id })
}

/// Moves a deliverable to another lifecycle state.
///
/// # Errors
/// Returns [`Error::DeliverableNotFound`] or a store error.
pub async fn update_status(
    db: &DatabaseConnection,
    deliverable_id: i64,
    status: DeliverableStatus,
) -> Result<deliverable::Model> {
    let existing = require_deliverable(db, deliverable_id).await?;

    let mut active_model: deliverable::ActiveModel = existing.into();
    active_model.status = Set(status.as_str().to_string());
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

/// Sets the amount invoiced on a deliverable.
///
/// # Errors
/// Returns [`Error::InvalidAmount`], [`Error::DeliverableNotFound`] or a store error.
pub async fn set_total_invoiced(
    db: &DatabaseConnection,
    deliverable_id: i64,
    total_invoiced: f64,
) -> Result<deliverable::Model> {
    let total_invoiced = validate_amount(total_invoiced)?;
    let existing = require_deliverable(db, deliverable_id).await?;

    let mut active_model: deliverable::ActiveModel = existing.into();
    active_model.total_invoiced = Set(total_invoiced);
    active_model.updated_at = Set(Utc::now().naive_utc());
    active_model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_status_tags() {
        for status in DeliverableStatus::ALL {
            assert_eq!(status.as_str().parse::<DeliverableStatus>().unwrap(), status);
        }
        assert_eq!(
            serde_json::to_string(&DeliverableStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(
            serde_json::to_string(&DeliverableStatus::ToQuote).unwrap(),
            "\"to_quote\""
        );
        assert!("done".parse::<DeliverableStatus>().is_err());
    }

    #[test]
    fn test_document_type_tags() {
        assert_eq!(
            "social-brief".parse::<DocumentType>().unwrap(),
            DocumentType::SocialBrief
        );
        assert_eq!(
            serde_json::to_string(&DocumentType::CreativeBrief).unwrap(),
            "\"creative-brief\""
        );
    }

    #[tokio::test]
    async fn test_create_and_update_deliverable() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let created = create_deliverable(
            &db,
            project.client_id,
            Some(project.id),
            "Compte-rendu kickoff".to_string(),
            DocumentType::Report,
        )
        .await?;
        assert_eq!(created.status, "to_quote");
        assert_eq!(created.document_type, "report");
        assert_eq!(created.total_invoiced, 0.0);

        let updated = update_status(&db, created.id, DeliverableStatus::Completed).await?;
        assert_eq!(updated.status, "completed");

        let updated = set_total_invoiced(&db, created.id, 450.0).await?;
        assert_eq!(updated.total_invoiced, 450.0);

        assert!(matches!(
            set_total_invoiced(&db, created.id, f64::NAN).await,
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            update_status(&db, 999, DeliverableStatus::Pending).await,
            Err(Error::DeliverableNotFound { id: 999 })
        ));

        let listed = get_deliverables_for_project(&db, project.id).await?;
        assert_eq!(listed.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_deliverable_without_project() -> Result<()> {
        let db = setup_test_db().await?;
        let client = create_test_client(&db, "Studio Onde").await?;
        let loose = create_test_deliverable(&db, client.id, None).await?;
        assert_eq!(loose.project_id, None);

        let listed = get_deliverables_for_client(&db, client.id).await?;
        assert_eq!(listed, vec![loose]);
        Ok(())
    }

    #[tokio::test]
    async fn test_deliverable_project_must_match_client() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let other = create_test_client(&db, "Autre client").await?;

        let result = create_deliverable(
            &db,
            other.id,
            Some(project.id),
            "Brief".to_string(),
            DocumentType::CreativeBrief,
        )
        .await;
        assert!(matches!(result, Err(Error::Config { .. })));
        Ok(())
    }
}
