//! Text formatting for billing figures and retroplans.
//!
//! Amounts follow French locale conventions: no decimals, digits grouped by
//! three with a narrow no-break space, and a no-break space before the euro
//! sign (`1 234 €`).

use crate::{
    core::{
        billing::{BillingStatus, ProjectBillingInfo},
        dates::{days_between, parse_day},
        deliverable::{DeliverableStatus, DocumentType},
        labels::{billing_status_style, deliverable_status_style, document_type_style},
        retroplanning::RetroplanningTask,
    },
    entities::deliverable,
    errors::Result,
};
use chrono::NaiveDate;
use std::fmt::Write;

/// Thousands separator (U+202F NARROW NO-BREAK SPACE).
pub const GROUP_SEPARATOR: char = '\u{202f}';
/// Space between amount and unit (U+00A0 NO-BREAK SPACE).
pub const UNIT_SEPARATOR: char = '\u{a0}';

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats an amount in euros with zero decimals, e.g. `1234.0` → `1 234 €`.
///
/// Halves round away from zero. An amount that rounds to zero is shown
/// without a sign.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    // Cast safety: display-only; magnitudes beyond u64 saturate.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let digits = (rounded.abs() as u64).to_string();
    format!("{sign}{}{UNIT_SEPARATOR}€", group_thousands(&digits))
}

/// Formats an integer percentage, e.g. `70` → `70 %`.
#[must_use]
pub fn format_percent(percent: i64) -> String {
    format!("{percent}{GROUP_SEPARATOR}%")
}

/// Text progress bar like `[███████░░░] 70 %`.
///
/// The bar itself is clamped to 0-100; the printed figure is not.
#[must_use]
pub fn format_progress_bar(progress_percent: i64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = progress_percent.clamp(0, 100);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the product fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((clamped as usize) * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {}",
        "█".repeat(filled),
        "░".repeat(empty),
        format_percent(progress_percent)
    )
}

/// One Gantt-style text row: the bar is offset by the days between
/// `plan_start` and the task start and is one cell per day.
///
/// # Errors
/// Returns an error if the task carries an unparseable date.
pub fn format_timeline_row(task: &RetroplanningTask, plan_start: NaiveDate) -> Result<String> {
    let start = parse_day(&task.start_date)?;
    let end = parse_day(&task.end_date)?;

    let offset = usize::try_from(days_between(plan_start, start) - 1).unwrap_or(0);
    let width = usize::try_from(days_between(start, end)).unwrap_or(0);

    Ok(format!(
        "{}{} {} → {} {}",
        " ".repeat(offset),
        "▇".repeat(width.max(1)),
        task.start_date,
        task.end_date,
        task.label
    ))
}

/// Multi-line billing summary of a project.
///
/// Projects without a quote only show their status line.
#[must_use]
pub fn format_billing_summary(
    project_name: &str,
    quote_amount: Option<f64>,
    info: &ProjectBillingInfo,
) -> String {
    let style = billing_status_style(info.status);
    let mut out = format!("**{project_name}** - {}", style.label);
    if info.status == BillingStatus::None {
        return out;
    }

    let quote = quote_amount.unwrap_or(0.0);
    let _ = write!(
        out,
        "\nDevis : {}\nPayé : {} (acompte + jalons {}, livrables {})\nReste : {}\n{}",
        format_currency(quote),
        format_currency(info.total_paid),
        format_currency(info.total_project_payments),
        format_currency(info.total_product_invoiced),
        format_currency(info.remaining),
        format_progress_bar(info.progress_percent, Some(10)),
    );
    out
}

/// One listing line for a deliverable: `#id title - type - status - amount`.
///
/// `project_name` is appended in brackets when given. Unknown stored tags are
/// shown raw.
#[must_use]
pub fn format_deliverable_row(item: &deliverable::Model, project_name: Option<&str>) -> String {
    let status = item
        .status
        .parse::<DeliverableStatus>()
        .map_or(item.status.as_str(), |s| deliverable_status_style(s).label);
    let kind = item
        .document_type
        .parse::<DocumentType>()
        .map_or(item.document_type.as_str(), |k| document_type_style(k).label);

    let mut row = format!(
        "#{} {} - {kind} - {status} - {}",
        item.id,
        item.title,
        format_currency(item.total_invoiced)
    );
    if let Some(name) = project_name {
        let _ = write!(row, " [{name}]");
    }
    row
}

/// Renders a whole plan, one [`format_timeline_row`] per task.
///
/// # Errors
/// Returns an error if a task carries an unparseable date.
pub fn format_retroplan(tasks: &[RetroplanningTask]) -> Result<String> {
    let Some(first) = tasks.first() else {
        return Ok(String::new());
    };
    let plan_start = parse_day(&first.start_date)?;

    let rows = tasks
        .iter()
        .map(|task| format_timeline_row(task, plan_start))
        .collect::<Result<Vec<_>>>()?;
    Ok(rows.join("\n"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::billing::{BillableDeliverable, BillingProject, compute_project_billing};
    use crate::core::retroplanning::{TaskColor, TaskStub, compute_dates_from_deadline};

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.0), "1\u{202f}234\u{a0}€");
        assert_eq!(format_currency(0.0), "0\u{a0}€");
        assert_eq!(format_currency(999.4), "999\u{a0}€");
        assert_eq!(format_currency(999.5), "1\u{202f}000\u{a0}€");
        assert_eq!(format_currency(1_234_567.89), "1\u{202f}234\u{202f}568\u{a0}€");
        assert_eq!(format_currency(-2500.0), "-2\u{202f}500\u{a0}€");
        assert_eq!(format_currency(-0.2), "0\u{a0}€");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(70), "70\u{202f}%");
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(100, Some(10)), "[██████████] 100\u{202f}%");
        assert_eq!(format_progress_bar(70, Some(10)), "[███████░░░] 70\u{202f}%");
        assert_eq!(format_progress_bar(0, None), "[░░░░░░░░░░] 0\u{202f}%");
        assert_eq!(format_progress_bar(-20, Some(5)), "[░░░░░] -20\u{202f}%");
    }

    #[test]
    fn test_format_timeline_row() {
        let task = RetroplanningTask {
            id: "t1".to_string(),
            label: "Production".to_string(),
            duration_days: 3,
            color: TaskColor::Green,
            start_date: "2025-03-05".to_string(),
            end_date: "2025-03-07".to_string(),
        };
        let plan_start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        assert_eq!(
            format_timeline_row(&task, plan_start).unwrap(),
            "  ▇▇▇ 2025-03-05 → 2025-03-07 Production"
        );
    }

    #[test]
    fn test_format_billing_summary() {
        let inputs = BillingProject {
            id: 7,
            quote_amount: Some(1000.0),
            deposit_amount: Some(300.0),
            progress_amounts: vec![400.0],
        };
        let info = compute_project_billing(&inputs, &[BillableDeliverable::default()]);
        let summary = format_billing_summary("Refonte", inputs.quote_amount, &info);

        assert!(summary.starts_with("**Refonte** - Paiements en cours"));
        assert!(summary.contains("Payé : 700\u{a0}€"));
        assert!(summary.contains("Reste : 300\u{a0}€"));
        assert!(summary.ends_with("[███████░░░] 70\u{202f}%"));

        let none = compute_project_billing(&BillingProject::default(), &[]);
        assert_eq!(format_billing_summary("Idée", None, &none), "**Idée** - Pas de devis");
    }

    #[test]
    fn test_format_deliverable_row() {
        let created = chrono::NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut item = deliverable::Model {
            id: 12,
            client_id: 1,
            project_id: None,
            title: "Charte graphique".to_string(),
            document_type: "creative-brief".to_string(),
            status: "in-progress".to_string(),
            total_invoiced: 1500.0,
            created_at: created,
            updated_at: created,
        };
        assert_eq!(
            format_deliverable_row(&item, None),
            "#12 Charte graphique - Brief créatif - En cours - 1\u{202f}500\u{a0}€"
        );
        assert!(format_deliverable_row(&item, Some("Refonte")).ends_with(" [Refonte]"));

        item.status = "archived".to_string();
        assert!(format_deliverable_row(&item, None).contains("- archived -"));
    }

    #[test]
    fn test_format_retroplan() {
        let stubs = [
            TaskStub::new("a", "Brief", 2, TaskColor::Gray),
            TaskStub::new("b", "Livraison", 1, TaskColor::Green),
        ];
        let deadline = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let plan = compute_dates_from_deadline(&stubs, deadline);

        assert_eq!(
            format_retroplan(&plan).unwrap(),
            "▇▇ 2025-03-08 → 2025-03-09 Brief\n  ▇ 2025-03-10 → 2025-03-10 Livraison"
        );
        assert_eq!(format_retroplan(&[]).unwrap(), "");
    }
}
