//! Deliverable entity - A billable unit of creative or document work.
//!
//! Deliverables belong to a client and optionally to a project. `status` and
//! `document_type` hold the kebab/snake tags understood by
//! [`crate::core::labels`].

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deliverable database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deliverables")]
pub struct Model {
    /// Unique identifier for the deliverable
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client the work is for
    pub client_id: i64,
    /// Project the deliverable is billed under, if any
    pub project_id: Option<i64>,
    /// Short title (e.g., "Brief campagne printemps")
    pub title: String,
    /// Document type tag: `"report"`, `"creative-brief"`, `"social-brief"` or `"other"`
    pub document_type: String,
    /// Lifecycle tag: `"to_quote"`, `"pending"`, `"in-progress"` or `"completed"`
    pub status: String,
    /// Amount invoiced for this deliverable, independent of the project quote
    pub total_invoiced: f64,
    /// When the deliverable was created
    pub created_at: DateTime,
    /// When the deliverable was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Deliverable and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each deliverable belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// A deliverable may belong to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
