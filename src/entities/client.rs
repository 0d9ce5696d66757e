//! Client entity - An agency customer whose relationship we track.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company or person name, unique among active clients
    pub name: String,
    /// Main contact e-mail, if known
    pub contact_email: Option<String>,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the client was created
    pub created_at: DateTime,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One client has many projects
    #[sea_orm(has_many = "super::project::Entity")]
    Projects,
    /// One client has many deliverables
    #[sea_orm(has_many = "super::deliverable::Entity")]
    Deliverables,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::deliverable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliverables.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
