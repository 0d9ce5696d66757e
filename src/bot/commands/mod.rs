//! Slash command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Client commands
pub mod client;

/// Deliverable commands
pub mod deliverable;

/// General utility commands
pub mod general;

/// Page layout validation
pub mod layout;

/// Project and billing commands
pub mod project;

/// Retroplanning commands
pub mod retroplan;

// Export commands
pub use client::*;
pub use deliverable::*;
pub use general::*;
pub use layout::*;
pub use project::*;
pub use retroplan::*;

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<super::BotData, crate::errors::Error>> {
    vec![
        ping(),
        help(),
        client_add(),
        clients(),
        client_remove(),
        project_add(),
        projects(),
        quote(),
        deposit(),
        progress_payment(),
        billing(),
        payments(),
        project_remove(),
        deliverable_add(),
        deliverable_status(),
        deliverable_invoice(),
        deliverables(),
        client_deliverables(),
        retroplan(),
        retroplan_show(),
        layout_check(),
    ]
}
