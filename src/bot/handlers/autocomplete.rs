//! Autocomplete handlers for slash command parameters.
//!
//! Suggestions come from the shared [`NameCache`](crate::core::cache::NameCache),
//! which is reloaded only when the cache token moved.

use crate::{bot::Context, core::cache::refresh_name_cache};
use tracing::warn;

/// Discord accepts at most this many suggestions.
const MAX_SUGGESTIONS: usize = 25;

fn matching(names: &[String], partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

/// Suggests active project names containing `partial` (case-insensitive).
pub async fn autocomplete_project_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let data = ctx.data();
    if let Err(e) = refresh_name_cache(&data.database, &data.names).await {
        warn!("Could not refresh name cache for autocomplete: {}", e);
    }
    matching(&data.names.read().await.project_names, partial)
}

/// Suggests active client names containing `partial` (case-insensitive).
pub async fn autocomplete_client_name(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let data = ctx.data();
    if let Err(e) = refresh_name_cache(&data.database, &data.names).await {
        warn!("Could not refresh name cache for autocomplete: {}", e);
    }
    matching(&data.names.read().await.client_names, partial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_is_case_insensitive_and_capped() {
        let names: Vec<String> = ["Refonte site", "Brochure", "REFONTE logo"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(matching(&names, "refonte"), vec!["Refonte site", "REFONTE logo"]);
        assert_eq!(matching(&names, "").len(), 3);

        let many: Vec<String> = (0..40).map(|i| format!("Projet {i}")).collect();
        assert_eq!(matching(&many, "projet").len(), MAX_SUGGESTIONS);
    }
}
