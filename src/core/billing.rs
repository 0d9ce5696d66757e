//! Project billing - derives a project's payment status and totals.
//!
//! [`compute_project_billing`] is a pure projection: it reads the project's
//! quote, deposit and milestone payments plus the amounts invoiced on its
//! deliverables, and never writes anything back. The async helpers at the
//! bottom load those inputs from the store and call it.

use crate::{
    entities::{Deliverable, ProgressPayment, deliverable, progress_payment, project},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, prelude::*};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Outstanding amounts at or below this are treated as fully paid.
pub const SETTLED_TOLERANCE: f64 = 0.01;

/// Derived billing status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingStatus {
    /// No formal quote yet
    None,
    /// Quoted, nothing paid
    Quoted,
    /// Deposit received, no milestone payment yet
    Deposit,
    /// Payments are coming in
    Progress,
    /// Fully paid
    Balanced,
}

impl BillingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Quoted,
        Self::Deposit,
        Self::Progress,
        Self::Balanced,
    ];

    /// Serialized tag of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Quoted => "quoted",
            Self::Deposit => "deposit",
            Self::Progress => "progress",
            Self::Balanced => "balanced",
        }
    }
}

impl fmt::Display for BillingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Billing inputs of a project.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BillingProject {
    /// Project identifier deliverables refer to
    pub id: i64,
    /// Agreed contract value; absent or non-positive means no quote
    pub quote_amount: Option<f64>,
    /// Upfront payment received
    pub deposit_amount: Option<f64>,
    /// Milestone payments, in the order they were received
    pub progress_amounts: Vec<f64>,
}

impl BillingProject {
    /// Assembles billing inputs from a stored project and its payments.
    #[must_use]
    pub fn from_models(project: &project::Model, payments: &[progress_payment::Model]) -> Self {
        Self {
            id: project.id,
            quote_amount: project.quote_amount,
            deposit_amount: project.deposit_amount,
            progress_amounts: payments.iter().map(|p| p.amount).collect(),
        }
    }
}

/// The part of a deliverable billing cares about.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BillableDeliverable {
    /// Project the deliverable is billed under, if any
    pub project_id: Option<i64>,
    /// Amount invoiced on the deliverable itself
    pub total_invoiced: f64,
}

impl From<&deliverable::Model> for BillableDeliverable {
    fn from(model: &deliverable::Model) -> Self {
        Self {
            project_id: model.project_id,
            total_invoiced: model.total_invoiced,
        }
    }
}

/// Result of [`compute_project_billing`]. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectBillingInfo {
    /// Derived status
    pub status: BillingStatus,
    /// Sum of `total_invoiced` over the project's deliverables
    pub total_product_invoiced: f64,
    /// Deposit plus all milestone payments
    pub total_project_payments: f64,
    /// `total_project_payments + total_product_invoiced`, not clamped
    pub total_paid: f64,
    /// Quote minus paid, floored at zero
    pub remaining: f64,
    /// Paid share of the quote, rounded, capped at 100
    pub progress_percent: i64,
}

impl ProjectBillingInfo {
    /// The all-zero projection of a project without a quote.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            status: BillingStatus::None,
            total_product_invoiced: 0.0,
            total_project_payments: 0.0,
            total_paid: 0.0,
            remaining: 0.0,
            progress_percent: 0,
        }
    }
}

/// Conditions the status decision is taken on.
#[derive(Debug, Clone, Copy)]
struct StatusFacts {
    settled: bool,
    paid: bool,
    has_deposit: bool,
    has_progress: bool,
    has_product_invoices: bool,
}

/// First matching arm wins; the arm order is the tie-break policy.
#[allow(clippy::match_same_arms)]
const fn derive_status(facts: StatusFacts) -> BillingStatus {
    match facts {
        StatusFacts { settled: true, .. } => BillingStatus::Balanced,
        StatusFacts {
            paid: true,
            has_deposit: true,
            has_progress: true,
            ..
        } => BillingStatus::Progress,
        StatusFacts {
            paid: true,
            has_deposit: true,
            ..
        } => BillingStatus::Deposit,
        StatusFacts {
            has_product_invoices: true,
            ..
        }
        | StatusFacts {
            has_progress: true, ..
        } => BillingStatus::Progress,
        _ => BillingStatus::Quoted,
    }
}

/// `Math.round`-style rounding: halves go toward positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Computes the billing projection of `project`.
///
/// `deliverables` may contain deliverables of any project; only those whose
/// `project_id` matches are counted. Negative amounts are not rejected and
/// flow through the sums; only `remaining` is clamped.
#[must_use]
pub fn compute_project_billing(
    project: &BillingProject,
    deliverables: &[BillableDeliverable],
) -> ProjectBillingInfo {
    let quote = match project.quote_amount {
        Some(quote) if quote > 0.0 => quote,
        _ => return ProjectBillingInfo::none(),
    };

    // `fold` from +0.0: an empty f64 `sum` yields -0.0.
    let total_product_invoiced = deliverables
        .iter()
        .filter(|d| d.project_id == Some(project.id))
        .fold(0.0, |acc, d| acc + d.total_invoiced);
    let deposit = project.deposit_amount.unwrap_or(0.0);
    let progress_total = project.progress_amounts.iter().fold(0.0, |acc, a| acc + a);
    let total_project_payments = deposit + progress_total;

    let total_paid = total_project_payments + total_product_invoiced;
    let outstanding = quote - total_paid;
    let remaining = if outstanding <= SETTLED_TOLERANCE {
        0.0
    } else {
        outstanding
    };

    // Float-to-int `as` saturates; the cap keeps the result at or below 100.
    #[allow(clippy::cast_possible_truncation)]
    let progress_percent = (round_half_up(total_paid / quote * 100.0) as i64).min(100);

    let status = derive_status(StatusFacts {
        settled: remaining <= SETTLED_TOLERANCE,
        paid: total_paid > 0.0,
        has_deposit: deposit > 0.0,
        has_progress: progress_total > 0.0,
        has_product_invoices: total_product_invoiced > 0.0,
    });

    ProjectBillingInfo {
        status,
        total_product_invoiced,
        total_project_payments,
        total_paid,
        remaining,
        progress_percent,
    }
}

/// Loads a project's billing inputs from the store.
///
/// # Errors
/// Returns [`Error::ProjectNotFound`] if no active project has this id.
pub async fn load_billing_inputs(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<(project::Model, BillingProject, Vec<BillableDeliverable>)> {
    let project = crate::core::project::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| Error::ProjectNotFound {
            name: project_id.to_string(),
        })?;

    let payments = ProgressPayment::find()
        .filter(progress_payment::Column::ProjectId.eq(project_id))
        .order_by_asc(progress_payment::Column::Id)
        .all(db)
        .await?;

    let deliverables = Deliverable::find()
        .filter(deliverable::Column::ProjectId.eq(project_id))
        .all(db)
        .await?;

    let inputs = BillingProject::from_models(&project, &payments);
    let billables = deliverables.iter().map(BillableDeliverable::from).collect();
    Ok((project, inputs, billables))
}

/// Loads one project and computes its billing projection.
///
/// # Errors
/// Returns an error if the project does not exist or the store fails.
pub async fn get_project_billing(
    db: &DatabaseConnection,
    project_id: i64,
) -> Result<(project::Model, ProjectBillingInfo)> {
    let (project, inputs, deliverables) = load_billing_inputs(db, project_id).await?;
    Ok((project, compute_project_billing(&inputs, &deliverables)))
}

/// Computes the billing projection of every active project, ordered by name.
///
/// Payments and deliverables are each loaded in one query.
///
/// # Errors
/// Returns an error if the store fails.
pub async fn get_all_project_billing(
    db: &DatabaseConnection,
) -> Result<Vec<(project::Model, ProjectBillingInfo)>> {
    let projects = crate::core::project::get_all_active_projects(db).await?;
    let payments = ProgressPayment::find()
        .order_by_asc(progress_payment::Column::Id)
        .all(db)
        .await?;
    let deliverables: Vec<BillableDeliverable> = Deliverable::find()
        .all(db)
        .await?
        .iter()
        .map(BillableDeliverable::from)
        .collect();

    let mut payments_by_project: HashMap<i64, Vec<progress_payment::Model>> = HashMap::new();
    for payment in payments {
        payments_by_project
            .entry(payment.project_id)
            .or_default()
            .push(payment);
    }

    Ok(projects
        .into_iter()
        .map(|project| {
            let project_payments = payments_by_project
                .get(&project.id)
                .map_or(&[][..], Vec::as_slice);
            let inputs = BillingProject::from_models(&project, project_payments);
            let info = compute_project_billing(&inputs, &deliverables);
            (project, info)
        })
        .collect())
}
