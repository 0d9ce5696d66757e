//! Display lookup tables: status and document-type tags to label/color pairs.
//!
//! Pure constant mappings read by the presentation layer.

use crate::core::{
    billing::BillingStatus,
    deliverable::{DeliverableStatus, DocumentType},
};

/// A display label with its color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleLabel {
    /// Human-readable label
    pub label: &'static str,
    /// Color tag used by the renderer
    pub color: &'static str,
}

const fn style(label: &'static str, color: &'static str) -> StyleLabel {
    StyleLabel { label, color }
}

/// Label and color of a billing status.
#[must_use]
pub const fn billing_status_style(status: BillingStatus) -> StyleLabel {
    match status {
        BillingStatus::None => style("Pas de devis", "gray"),
        BillingStatus::Quoted => style("Devis envoyé", "blue"),
        BillingStatus::Deposit => style("Acompte reçu", "amber"),
        BillingStatus::Progress => style("Paiements en cours", "purple"),
        BillingStatus::Balanced => style("Soldé", "green"),
    }
}

/// Label and color of a deliverable status.
#[must_use]
pub const fn deliverable_status_style(status: DeliverableStatus) -> StyleLabel {
    match status {
        DeliverableStatus::ToQuote => style("À chiffrer", "orange"),
        DeliverableStatus::Pending => style("En attente", "gray"),
        DeliverableStatus::InProgress => style("En cours", "blue"),
        DeliverableStatus::Completed => style("Terminé", "green"),
    }
}

/// Label and color of a document type.
#[must_use]
pub const fn document_type_style(document_type: DocumentType) -> StyleLabel {
    match document_type {
        DocumentType::Report => style("Compte-rendu", "blue"),
        DocumentType::CreativeBrief => style("Brief créatif", "purple"),
        DocumentType::SocialBrief => style("Brief social media", "pink"),
        DocumentType::Other => style("Autre", "gray"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_billing_status_table() {
        assert_eq!(billing_status_style(BillingStatus::None).label, "Pas de devis");
        assert_eq!(billing_status_style(BillingStatus::Balanced).color, "green");

        let labels: HashSet<_> = BillingStatus::ALL
            .into_iter()
            .map(|s| billing_status_style(s).label)
            .collect();
        assert_eq!(labels.len(), 5, "every billing status has its own label");
    }

    #[test]
    fn test_deliverable_status_table() {
        let labels: HashSet<_> = DeliverableStatus::ALL
            .into_iter()
            .map(|s| deliverable_status_style(s).label)
            .collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(
            deliverable_status_style(DeliverableStatus::InProgress),
            StyleLabel {
                label: "En cours",
                color: "blue"
            }
        );
    }

    #[test]
    fn test_document_type_table() {
        assert_eq!(
            document_type_style(DocumentType::CreativeBrief).label,
            "Brief créatif"
        );
        assert_eq!(document_type_style(DocumentType::SocialBrief).color, "pink");
    }
}
