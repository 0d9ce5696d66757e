//! Project commands - creation, quote and payments, billing status.
//!
//! Billing figures are never stored; every reply recomputes them from the
//! current quote, payments and deliverable invoices.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{Context, answer_user_error, find_client, find_project, handlers::autocomplete},
        core::{
            billing,
            dates::format_day,
            format::{format_billing_summary, format_currency, format_percent},
            labels::billing_status_style,
            project,
        },
        errors::Result,
    };
    use std::fmt::Write;

    /// Creates a project for an existing client.
    #[poise::command(slash_command, prefix_command)]
    pub async fn project_add(
        ctx: Context<'_>,
        #[description = "Client the project is for"]
        #[autocomplete = "autocomplete::autocomplete_client_name"]
        client_name: String,
        #[description = "Project name"] name: String,
        #[description = "Quoted amount in euros"] quote: Option<f64>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(owner) = find_client(ctx, &client_name).await? else {
            return Ok(());
        };

        let Some(created) = answer_user_error(
            ctx,
            project::create_project(db, owner.id, name, quote).await,
        )
        .await?
        else {
            return Ok(());
        };

        let quote_text = created
            .quote_amount
            .map_or_else(|| "sans devis".to_string(), format_currency);
        ctx.say(format!(
            "✅ Projet '{}' créé pour {} ({quote_text}).",
            created.name, owner.name
        ))
        .await?;
        Ok(())
    }

    /// Lists every active project with its billing status.
    #[poise::command(slash_command, prefix_command)]
    pub async fn projects(ctx: Context<'_>) -> Result<()> {
        let db = &ctx.data().database;
        let all = billing::get_all_project_billing(db).await?;

        if all.is_empty() {
            ctx.say("Aucun projet. Créez-en un avec `/project_add`.")
                .await?;
            return Ok(());
        }

        let mut out = String::from("**Projets**\n");
        for (p, info) in &all {
            let style = billing_status_style(info.status);
            writeln!(
                out,
                "• {} - {} - reste {} ({})",
                p.name,
                style.label,
                format_currency(info.remaining),
                format_percent(info.progress_percent)
            )?;
        }

        ctx.say(out).await?;
        Ok(())
    }

    /// Sets the quoted amount of a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn quote(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
        #[description = "Quoted amount in euros"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };
        if answer_user_error(ctx, project::set_quote(db, p.id, amount).await)
            .await?
            .is_none()
        {
            return Ok(());
        }

        ctx.say(format!(
            "✅ Devis de '{}' fixé à {}.",
            p.name,
            format_currency(amount)
        ))
        .await?;
        Ok(())
    }

    /// Records the deposit received on a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn deposit(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
        #[description = "Deposit in euros"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };
        if answer_user_error(ctx, project::record_deposit(db, p.id, amount).await)
            .await?
            .is_none()
        {
            return Ok(());
        }

        ctx.say(format!(
            "✅ Acompte de {} enregistré sur '{}'.",
            format_currency(amount),
            p.name
        ))
        .await?;
        Ok(())
    }

    /// Adds a milestone payment to a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn progress_payment(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
        #[description = "Amount received in euros"] amount: f64,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };
        if answer_user_error(ctx, project::add_progress_payment(db, p.id, amount).await)
            .await?
            .is_none()
        {
            return Ok(());
        }

        let (_, info) = billing::get_project_billing(db, p.id).await?;
        ctx.say(format!(
            "✅ Paiement de {} ajouté.\n{}",
            format_currency(amount),
            format_billing_summary(&p.name, p.quote_amount, &info)
        ))
        .await?;
        Ok(())
    }

    /// Shows the billing breakdown of a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn billing(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };

        let (p, info) = billing::get_project_billing(db, p.id).await?;
        ctx.say(format_billing_summary(&p.name, p.quote_amount, &info))
            .await?;
        Ok(())
    }

    /// Lists the milestone payments recorded on a project.
    #[poise::command(slash_command, prefix_command)]
    pub async fn payments(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(p) = find_project(ctx, &project_name).await? else {
            return Ok(());
        };

        let mut out = format!("**Paiements de {}**\n", p.name);
        if let Some(deposit) = p.deposit_amount.filter(|d| *d > 0.0) {
            writeln!(out, "• Acompte : {}", format_currency(deposit))?;
        }
        let milestones = project::get_progress_payments(db, p.id).await?;
        for payment in &milestones {
            writeln!(
                out,
                "• {} : {}",
                format_day(payment.received_at.date_naive()),
                format_currency(payment.amount)
            )?;
        }
        if milestones.is_empty() {
            out.push_str("Aucun paiement intermédiaire.");
        }

        ctx.say(out).await?;
        Ok(())
    }

    /// Archives a project. Its deliverables and payments are kept.
    #[poise::command(slash_command, prefix_command)]
    pub async fn project_remove(
        ctx: Context<'_>,
        #[description = "Project"]
        #[autocomplete = "autocomplete::autocomplete_project_name"]
        project_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let Some(removed) =
            answer_user_error(ctx, project::soft_delete_project(db, &project_name).await).await?
        else {
            return Ok(());
        };

        ctx.say(format!("🗑️ Projet '{}' archivé.", removed.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
