//! Unified error types and result handling.
//!
//! The pure billing and scheduling functions never fail; every variant here
//! comes from the store, the configuration layer, or boundary validation.

use thiserror::Error;

/// Errors produced by the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed, or an input was rejected.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description
        message: String,
    },

    /// The underlying store returned an error.
    #[error("Database error: {0}")]
    Database(String),

    /// No active client with this name.
    #[error("Client not found: {name}")]
    ClientNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// No active project with this name.
    #[error("Project not found: {name}")]
    ProjectNotFound {
        /// Name or id used for the lookup
        name: String,
    },

    /// No deliverable with this id.
    #[error("Deliverable not found: {id}")]
    DeliverableNotFound {
        /// Deliverable id
        id: i64,
    },

    /// A monetary amount was negative, NaN or infinite.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A retroplanning task was given fewer than one day.
    #[error("Invalid duration: {days} day(s), must be at least 1")]
    InvalidDuration {
        /// The rejected duration
        days: i64,
    },

    /// A date string was not a `YYYY-MM-DD` calendar day.
    #[error("Invalid date: {value}")]
    InvalidDate {
        /// The rejected input
        value: String,
    },

    /// Section content did not match its component schema.
    #[error("Invalid section content: {message}")]
    InvalidSection {
        /// What was wrong with the content
        message: String,
    },

    /// A required environment variable was missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Writing a reply into a buffer failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/poise failure.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
