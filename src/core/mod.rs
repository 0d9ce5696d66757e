//! Core business logic - framework-agnostic billing, scheduling and record keeping.
//!
//! `billing`, `retroplanning`, `dates`, `labels` and `format` hold the pure
//! computations; the remaining modules are the store-backed operations that
//! feed them.

/// Project billing projection
pub mod billing;
/// Cache invalidation token and name cache
pub mod cache;
/// Client records
pub mod client;
/// Calendar-day arithmetic
pub mod dates;
/// Deliverable records, statuses and document types
pub mod deliverable;
/// Currency, percentage and timeline formatting
pub mod format;
/// Display label/color lookup tables
pub mod labels;
/// Projects, quotes and payments
pub mod project;
/// Backward scheduling from a deadline
pub mod retroplanning;
/// Validated marketing page sections
pub mod section;
