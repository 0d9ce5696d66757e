//! Interaction handlers
//!
//! Handlers for interactions other than commands, such as autocomplete.

/// Autocomplete handlers for project and client names
pub mod autocomplete;
