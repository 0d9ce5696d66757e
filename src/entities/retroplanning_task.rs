//! Retroplanning task entity - A stored, already-scheduled phase of a project.
//!
//! Dates are the `YYYY-MM-DD` strings produced by the scheduler; `position`
//! keeps the original task order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Retroplanning task database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "retroplanning_tasks")]
pub struct Model {
    /// Row identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Project the plan belongs to
    pub project_id: i64,
    /// Position of the task in the plan, starting at 0
    pub position: i32,
    /// Caller-supplied task identifier
    pub task_key: String,
    /// Display label
    pub label: String,
    /// Inclusive length in days
    pub duration_days: i64,
    /// Color tag
    pub color: String,
    /// First day of the task
    pub start_date: String,
    /// Last day of the task
    pub end_date: String,
}

/// Defines relationships between `RetroplanningTask` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each task belongs to one project
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
