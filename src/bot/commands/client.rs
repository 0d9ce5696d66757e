//! Client commands - add, list and archive clients.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, answer_user_error, handlers::autocomplete},
        core::{client, project},
        errors::Result,
    };
    use std::fmt::Write;

    /// Adds a client.
    #[poise::command(slash_command, prefix_command)]
    pub async fn client_add(
        ctx: Context<'_>,
        #[description = "Client name"] name: String,
        #[description = "Main contact e-mail"] email: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(created) =
            answer_user_error(ctx, client::create_client(db, name, email).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!("✅ Client '{}' ajouté.", created.name))
            .await?;
        Ok(())
    }

    /// Lists active clients with their projects.
    #[poise::command(slash_command, prefix_command)]
    pub async fn clients(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let all = client::get_all_active_clients(db).await?;

        if all.is_empty() {
            ctx.say("Aucun client. Ajoutez-en un avec `/client_add`.")
                .await?;
            return Ok(());
        }

        let mut out = String::from("**Clients**\n");
        for c in &all {
            let names: Vec<String> = project::get_projects_for_client(db, c.id)
                .await?
                .into_iter()
                .map(|p| p.name)
                .collect();
            let contact = c.contact_email.as_deref().unwrap_or("-");
            if names.is_empty() {
                writeln!(out, "• {} ({contact})", c.name)?;
            } else {
                writeln!(out, "• {} ({contact}) : {}", c.name, names.join(", "))?;
            }
        }

        ctx.say(out).await?;
        Ok(())
    }

    /// Archives a client. Its projects and deliverables are kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn client_remove(
        ctx: Context<'_>,
        #[description = "Client name"]
        #[autocomplete = "autocomplete::autocomplete_client_name"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(removed) =
            answer_user_error(ctx, client::soft_delete_client(db, &name).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!("🗑️ Client '{}' archivé.", removed.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
