//! Cache invalidation token and the name cache it guards.
//!
//! The token is a generation counter stored in `system_state`. Every operation
//! that changes a client or project name bumps it; a [`NameCache`] remembers
//! the generation it was built from and reloads only once that is stale. The
//! cache itself is owned by whoever constructs it (the bot context, a test),
//! never by a global.

use crate::{
    entities::{SystemState, system_state},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, trace};

const CACHE_GENERATION_KEY: &str = "cache_generation";

/// Generation number of cached data. Starts at 0 when nothing was ever bumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CacheToken(pub u64);

/// Reads the current token.
///
/// # Errors
/// Returns an error if the store fails or holds a non-numeric value.
pub async fn current_cache_token<C>(db: &C) -> Result<CacheToken>
where
    C: ConnectionTrait,
{
    let state = SystemState::find()
        .filter(system_state::Column::Key.eq(CACHE_GENERATION_KEY))
        .one(db)
        .await?;

    match state {
        Some(s) => s.value.parse().map(CacheToken).map_err(|e| Error::Config {
            message: format!("Failed to parse cache generation '{}': {e}", s.value),
        }),
        None => Ok(CacheToken::default()),
    }
}

/// Increments the token and returns the new value.
///
/// # Errors
/// Returns an error if the store fails.
pub async fn bump_cache_token<C>(db: &C) -> Result<CacheToken>
where
    C: ConnectionTrait,
{
    let next = CacheToken(current_cache_token(db).await?.0 + 1);
    let now = Utc::now().naive_utc();

    let existing = SystemState::find()
        .filter(system_state::Column::Key.eq(CACHE_GENERATION_KEY))
        .one(db)
        .await?;

    if let Some(state) = existing {
        let mut active_model: system_state::ActiveModel = state.into();
        active_model.value = Set(next.0.to_string());
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let new_state = system_state::ActiveModel {
            key: Set(CACHE_GENERATION_KEY.to_string()),
            value: Set(next.0.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };
        new_state.insert(db).await?;
    }

    debug!("Cache token bumped to {}", next.0);
    Ok(next)
}

/// Client and project names used for autocomplete.
#[derive(Debug, Clone, Default)]
pub struct NameCache {
    /// Generation the names were loaded at; `None` until first load
    pub token: Option<CacheToken>,
    /// Active client names, alphabetical
    pub client_names: Vec<String>,
    /// Active project names, alphabetical
    pub project_names: Vec<String>,
}

impl NameCache {
    /// Whether the cache must be reloaded for `current`.
    #[must_use]
    pub fn is_stale(&self, current: CacheToken) -> bool {
        self.token != Some(current)
    }
}

/// Shared handle to a [`NameCache`].
pub type SharedNameCache = Arc<RwLock<NameCache>>;

/// Reloads `cache` if the stored token moved since it was last filled.
///
/// Returns `true` when a reload happened.
///
/// # Errors
/// Returns an error if the store fails.
pub async fn refresh_name_cache(db: &DatabaseConnection, cache: &SharedNameCache) -> Result<bool> {
    let current = current_cache_token(db).await?;
    if !cache.read().await.is_stale(current) {
        trace!("Name cache is fresh at generation {}", current.0);
        return Ok(false);
    }

    let client_names = crate::core::client::get_all_active_clients(db)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let project_names = crate::core::project::get_all_active_projects(db)
        .await?
        .into_iter()
        .map(|p| p.name)
        .collect();

    let mut cache_writer = cache.write().await;
    *cache_writer = NameCache {
        token: Some(current),
        client_names,
        project_names,
    };
    info!(
        "Name cache refreshed at generation {} with {} clients and {} projects",
        current.0,
        cache_writer.client_names.len(),
        cache_writer.project_names.len()
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_token_starts_at_zero_and_bumps() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(current_cache_token(&db).await?, CacheToken(0));
        assert_eq!(bump_cache_token(&db).await?, CacheToken(1));
        assert_eq!(bump_cache_token(&db).await?, CacheToken(2));
        assert_eq!(current_cache_token(&db).await?, CacheToken(2));
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_only_when_stale() -> Result<()> {
        let db = setup_test_db().await?;
        let cache = SharedNameCache::default();

        // Empty store: first refresh still fills the cache at generation 0
        assert!(refresh_name_cache(&db, &cache).await?);
        assert!(!refresh_name_cache(&db, &cache).await?);

        // Creating a client and project bumps the token
        let client = create_test_client(&db, "Atelier Nord").await?;
        create_custom_project(&db, client.id, "Rebranding", None).await?;
        let token = current_cache_token(&db).await?;
        assert!(cache.read().await.is_stale(token));

        assert!(refresh_name_cache(&db, &cache).await?);
        let guard = cache.read().await;
        assert_eq!(guard.token, Some(token));
        assert_eq!(guard.client_names, vec!["Atelier Nord".to_string()]);
        assert_eq!(guard.project_names, vec!["Rebranding".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn test_only_name_changes_bump_the_token() -> Result<()> {
        let (db, project) = setup_with_project().await?;
        let cache = SharedNameCache::default();
        refresh_name_cache(&db, &cache).await?;
        let before = current_cache_token(&db).await?;

        // Amount updates leave the name set alone
        crate::core::project::set_quote(&db, project.id, 5000.0).await?;
        crate::core::project::record_deposit(&db, project.id, 1500.0).await?;
        crate::core::project::add_progress_payment(&db, project.id, 500.0).await?;
        assert_eq!(current_cache_token(&db).await?, before);
        assert!(!refresh_name_cache(&db, &cache).await?);

        crate::core::project::soft_delete_project(&db, &project.name).await?;
        assert!(current_cache_token(&db).await? > before);
        assert!(refresh_name_cache(&db, &cache).await?);
        assert!(cache.read().await.project_names.is_empty());
        Ok(())
    }

    #[test]
    fn test_injected_token_controls_staleness() {
        let cache = NameCache {
            token: Some(CacheToken(7)),
            ..Default::default()
        };
        assert!(!cache.is_stale(CacheToken(7)));
        assert!(cache.is_stale(CacheToken(8)));
        assert!(NameCache::default().is_stale(CacheToken(0)));
    }
}
