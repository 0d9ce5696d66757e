//! Layout commands - check a marketing page layout before it is published.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, answer_user_error},
        core::section::{SectionContent, parse_layout},
        errors::Result,
    };

    /// Validates a page layout given as a JSON array of sections.
    #[poise::command(slash_command, prefix_command)]
    pub async fn layout_check(
        ctx: Context<'_>,
        #[description = "Layout JSON: [{\"component\": ..., \"content\": {...}}, ...]"]
        layout: String,
    ) -> Result<()> {
        let Some(sections) = answer_user_error(ctx, parse_layout(&layout)).await? else {
            return Ok(());
        };

        if sections.is_empty() {
            ctx.say("Mise en page vide.").await?;
            return Ok(());
        }

        let components: Vec<&str> = sections.iter().map(SectionContent::component).collect();
        ctx.say(format!(
            "✅ {} section(s) valide(s) : {}.",
            sections.len(),
            components.join(", ")
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
