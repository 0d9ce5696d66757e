//! Deliverable commands - create, update and list deliverables.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, answer_user_error, find_client, find_project, handlers::autocomplete},
        core::{
            deliverable::{self, DeliverableStatus, DocumentType},
            format::{format_currency, format_deliverable_row},
            labels::{deliverable_status_style, document_type_style},
            project,
        },
        errors::Result,
    };
    use std::collections::HashMap;
    use std::fmt::Write;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum DocumentTypeChoice {
        #[name = "Compte-rendu"]
        Report,
        #[name = "Brief créatif"]
        CreativeBrief,
        #[name = "Brief social media"]
        SocialBrief,
        #[name = "Autre"]
        Other,
    }

    impl From<DocumentTypeChoice> for DocumentType {
        fn from(choice: DocumentTypeChoice) -> Self {
            match choice {
                DocumentTypeChoice::Report => Self::Report,
                DocumentTypeChoice::CreativeBrief => Self::CreativeBrief,
                DocumentTypeChoice::SocialBrief => Self::SocialBrief,
                DocumentTypeChoice::Other => Self::Other,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "À chiffrer"]
        ToQuote,
        #[name = "En attente"]
        Pending,
        #[name = "En cours"]
        InProgress,
        #[name = "Terminé"]
        Completed,
    }

    impl From<StatusChoice> for DeliverableStatus {
        fn from(choice: StatusChoice) -> Self {
            match choice {
                StatusChoice::ToQuote => Self::ToQuote,
                StatusChoice::Pending => Self::Pending,
                StatusChoice::InProgress => Self::InProgress,
                StatusChoice::Completed => Self::Completed,
            }
        }
    }

    /// Creates a deliverable for a client, optionally under one of its projects.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deliverable_add(
        ctx: Context<'_>,
        #[description = "Client"]
        #[autocomplete = "autocomplete::autocomplete_client_name"]
        client_name: String,
        #[description = "Title"] title: String,
        #[description = "Document type"] document_type: DocumentTypeChoice,
        #[description = "Project to bill it under"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(owner) = find_client(ctx, &client_name).await? else {
            return Ok(());
        };

        let project_id = match project_name {
            Some(name) => match find_project(ctx, &name).await? {
                Some(p) => Some(p.id),
                None => return Ok(()),
            },
            None => None,
        };

        let Some(created) = answer_user_error(
            ctx,
            deliverable::create_deliverable(db, owner.id, project_id, title, document_type.into())
                .await,
        )
        .await?
        else {
            return Ok(());
        };

        ctx.say(format!(
            "✅ Livrable #{} '{}' créé ({}).",
            created.id,
            created.title,
            document_type_style(document_type.into()).label
        ))
        .await?;
        Ok(())
    }

    /// Changes the status of a deliverable.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deliverable_status(
        ctx: Context<'_>,
        #[description = "Deliverable id"] id: i64,
        #[description = "New status"] status: StatusChoice,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let status: DeliverableStatus = status.into();
        let Some(updated) =
            answer_user_error(ctx, deliverable::update_status(db, id, status).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!(
            "✅ Livrable #{} '{}' : {}.",
            updated.id,
            updated.title,
            deliverable_status_style(status).label
        ))
        .await?;
        Ok(())
    }

    /// Sets the amount invoiced on a deliverable.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deliverable_invoice(
        ctx: Context<'_>,
        #[description = "Deliverable id"] id: i64,
        #[description = "Amount invoiced in euros"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(updated) =
            answer_user_error(ctx, deliverable::set_total_invoiced(db, id, amount).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!(
            "✅ Livrable #{} '{}' facturé {}.",
            updated.id,
            updated.title,
            format_currency(updated.total_invoiced)
        ))
        .await?;
        Ok(())
    }

    /// Lists the deliverables billed under a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deliverables(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };

        let items = deliverable::get_deliverables_for_project(db, p.id).await?;
        if items.is_empty() {
            ctx.say(format!("Aucun livrable pour '{}'.", p.name)).await?;
            return Ok(());
        }

        let mut out = format!("**Livrables de {}**\n", p.name);
        for d in &items {
            writeln!(out, "• {}", format_deliverable_row(d, None))?;
        }

        ctx.say(out).await?;
        Ok(())
    }

    /// Lists every deliverable of a client, including those outside any project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn client_deliverables(
        ctx: Context<'_>,
        #[description = "Client"]
        #[autocomplete = "autocomplete::autocomplete_client_name"]
        client_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(owner) = find_client(ctx, &client_name).await? else {
            return Ok(());
        };

        let items = deliverable::get_deliverables_for_client(db, owner.id).await?;
        if items.is_empty() {
            ctx.say(format!("Aucun livrable pour {}.", owner.name))
                .await?;
            return Ok(());
        }

        let project_names: HashMap<i64, String> = project::get_projects_for_client(db, owner.id)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();

        let mut out = format!("**Livrables de {}**\n", owner.name);
        for d in &items {
            let project_name = match d.project_id {
                Some(id) => project_names.get(&id).map_or("projet archivé", String::as_str),
                None => "hors projet",
            };
            writeln!(out, "• {}", format_deliverable_row(d, Some(project_name)))?;
        }

        ctx.say(out).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
