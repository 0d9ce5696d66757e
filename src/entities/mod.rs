//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the store records that feed billing and retroplanning.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod client;
pub mod deliverable;
pub mod progress_payment;
pub mod project;
pub mod retroplanning_task;
pub mod system_state;

// Re-export specific types to avoid conflicts
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use deliverable::{
    Column as DeliverableColumn, Entity as Deliverable, Model as DeliverableModel,
};
pub use progress_payment::{
    Column as ProgressPaymentColumn, Entity as ProgressPayment, Model as ProgressPaymentModel,
};
pub use project::{Column as ProjectColumn, Entity as Project, Model as ProjectModel};
pub use retroplanning_task::{
    Column as RetroplanningTaskColumn, Entity as RetroplanningTask,
    Model as RetroplanningTaskModel,
};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
