//! General commands - ping and help.
//! These commands don't touch the database.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let help_text = "**Agency Desk - aide**\n\n\
        **Clients**\n\
        • `/client_add <nom> [email]` - Ajoute un client.\n\
        • `/clients` - Liste les clients et leurs projets.\n\
        • `/client_remove <nom>` - Archive un client.\n\n\
        **Projets & facturation**\n\
        • `/project_add <client> <nom> [devis]` - Crée un projet.\n\
        • `/projects` - Statut de facturation de tous les projets.\n\
        • `/quote <projet> <montant>` - Fixe le montant du devis.\n\
        • `/deposit <projet> <montant>` - Enregistre l'acompte.\n\
        • `/progress_payment <projet> <montant>` - Ajoute un paiement intermédiaire.\n\
        • `/billing <projet>` - Détail de facturation d'un projet.\n\
        • `/payments <projet>` - Liste l'acompte et les paiements intermédiaires.\n\
        • `/project_remove <projet>` - Archive un projet.\n\n\
        **Livrables**\n\
        • `/deliverable_add <client> <titre> <type> [projet]` - Crée un livrable.\n\
        • `/deliverable_status <id> <statut>` - Change le statut.\n\
        • `/deliverable_invoice <id> <montant>` - Fixe le montant facturé.\n\
        • `/deliverables <projet>` - Liste les livrables d'un projet.\n\
        • `/client_deliverables <client>` - Tous les livrables d'un client, avec ou sans projet.\n\n\
        **Rétroplanning**\n\
        • `/retroplan <projet> <deadline AAAA-MM-JJ>` - Calcule le planning à rebours.\n\
        • `/retroplan_show <projet>` - Affiche le planning enregistré.\n\n\
        **Pages**\n\
        • `/layout_check <json>` - Vérifie une mise en page avant publication.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
