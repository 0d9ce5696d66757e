//! Progress payment entity - One milestone payment received on a project.
//! Rows are read back ordered by id to rebuild the project's payment sequence.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Progress payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "progress_payments")]
pub struct Model {
    /// Unique identifier, also the ordering key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the payment was made against
    pub project_id: i64,
    /// Amount received
    pub amount: f64,
    /// When the payment was recorded
    pub received_at: DateTimeUtc,
}

/// Defines relationships between `ProgressPayment` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one project
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
