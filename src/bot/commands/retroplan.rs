//! Retroplanning commands - schedule a project backward from its deadline.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, answer_user_error, find_project, handlers::autocomplete},
        core::{
            dates::parse_day,
            format::format_retroplan,
            retroplanning::{self, parse_stub_list},
        },
        errors::Result,
    };

    /// Computes and stores a retroplan ending on the deadline.
    ///
    /// Without `tasks`, the default phase template from the settings is used.
    #[poise::command(slash_command, prefix_command)]
    pub async fn retroplan(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
        #[description = "Deadline (YYYY-MM-DD)"] deadline: String,
        #[description = "Tasks as 'label:days[:color]', comma separated"] tasks: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };
        let Some(deadline) = answer_user_error(ctx, parse_day(&deadline)).await? else {
            return Ok(());
        };

        let stubs = match tasks {
            Some(list) => match answer_user_error(ctx, parse_stub_list(&list)).await? {
                Some(stubs) => stubs,
                None => return Ok(()),
            },
            None => data.settings.retroplanning.stubs(),
        };

        let Some(plan) = answer_user_error(
            ctx,
            retroplanning::save_retroplan(&data.database, p.id, &stubs, deadline).await,
        )
        .await?
        else {
            return Ok(());
        };

        if plan.is_empty() {
            ctx.say(format!("Planning de '{}' vidé.", p.name)).await?;
            return Ok(());
        }

        ctx.say(format!(
            "📅 **Rétroplanning de {}**\n```\n{}\n```",
            p.name,
            format_retroplan(&plan)?
        ))
        .await?;
        Ok(())
    }

    /// Shows the stored retroplan of a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn retroplan_show(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
    ) -> Result<()> {
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };

        let plan = retroplanning::get_retroplan(&ctx.data().database, p.id).await?;
        if plan.is_empty() {
            ctx.say(format!(
                "Aucun planning pour '{}'. Utilisez `/retroplan`.",
                p.name
            ))
            .await?;
            return Ok(());
        }

        ctx.say(format!(
            "📅 **Rétroplanning de {}**\n```\n{}\n```",
            p.name,
            format_retroplan(&plan)?
        ))
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
