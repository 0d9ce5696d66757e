//! Project entity - A contractual engagement with an optional quote.
//!
//! The quote and deposit are stored on the project row; milestone payments
//! live in `progress_payments` so their order is preserved.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Project database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    /// Unique identifier for the project
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client this engagement is for
    pub client_id: i64,
    /// Project name, unique among active projects
    pub name: String,
    /// Agreed total contract value; `None` means no formal quote yet
    pub quote_amount: Option<f64>,
    /// Upfront payment received
    pub deposit_amount: Option<f64>,
    /// Soft delete flag
    pub is_deleted: bool,
    /// When the project was created
    pub created_at: DateTime,
    /// When the project was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between Project and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each project belongs to one client
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ClientId",
        to = "super::client::Column::Id"
    )]
    Client,
    /// One project has many milestone payments
    #[sea_orm(has_many = "super::progress_payment::Entity")]
    ProgressPayments,
    /// One project has many deliverables
    #[sea_orm(has_many = "super::deliverable::Entity")]
    Deliverables,
    /// One project has many retroplanning tasks
    #[sea_orm(has_many = "super::retroplanning_task::Entity")]
    RetroplanningTasks,
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::progress_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgressPayments.def()
    }
}

impl Related<super::deliverable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deliverables.def()
    }
}

impl Related<super::retroplanning_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RetroplanningTasks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
