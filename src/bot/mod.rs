//! Bot layer - chat-command interface and handlers
//!
//! This module exposes clients, projects, billing, deliverables and retroplans
//! as slash commands. Commands only parse arguments, call `core`, and render
//! the result as text.

/// Slash command implementations (clients, projects, deliverables, retroplans, general)
pub mod commands;
/// Interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    core::{cache::SharedNameCache, client, project},
    entities,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// Shared data available to all bot commands.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings loaded at startup
    pub settings: Settings,
    /// Autocomplete names, invalidated through the cache token
    pub names: SharedNameCache,
}

impl BotData {
    /// Creates the command context with an empty name cache.
    #[must_use]
    pub fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self {
            database,
            settings,
            names: SharedNameCache::default(),
        }
    }
}

/// Poise context alias used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Errors caused by user input, answered in the channel instead of logged.
#[must_use]
pub const fn is_user_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Config { .. }
            | Error::ClientNotFound { .. }
            | Error::ProjectNotFound { .. }
            | Error::DeliverableNotFound { .. }
            | Error::InvalidAmount { .. }
            | Error::InvalidDuration { .. }
            | Error::InvalidDate { .. }
            | Error::InvalidSection { .. }
    )
}

/// Sends `❌ <error>` for user errors and propagates the rest.
///
/// Returns `Ok(None)` once the error was answered so callers can `return`.
pub async fn answer_user_error<T>(ctx: Context<'_>, result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_user_error(&e) => {
            ctx.say(format!("❌ {e}")).await?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Looks up an active project by name, answering in the channel when missing.
pub async fn find_project(
    ctx: Context<'_>,
    name: &str,
) -> Result<Option<entities::project::Model>> {
    let found = project::get_project_by_name(&ctx.data().database, name).await?;
    if found.is_none() {
        ctx.say(format!(
            "❌ Projet '{name}' introuvable. Utilisez `/projects` pour voir la liste."
        ))
        .await?;
    }
    Ok(found)
}

/// Looks up an active client by name, answering in the channel when missing.
pub async fn find_client(
    ctx: Context<'_>,
    name: &str,
) -> Result<Option<entities::client::Model>> {
    let found = client::get_client_by_name(&ctx.data().database, name).await?;
    if found.is_none() {
        ctx.say(format!("❌ Client '{name}' introuvable.")).await?;
    }
    Ok(found)
}

pub use commands::*;
pub use handlers::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::section::parse_layout;

    #[test]
    fn test_layout_errors_are_answered_to_the_user() {
        let Err(err) = parse_layout(r#"[{"component": "hero", "content": {}}]"#) else {
            panic!("hero without a title must be rejected");
        };
        assert!(is_user_error(&err));
        assert!(!is_user_error(&Error::Database("disk I/O error".to_string())));
    }
}
