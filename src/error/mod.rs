//! Error types for the Herald conformance harness.
//!
//! Every failure a scenario can produce is classified here so reports can tell apart a
//! system under test that broke its contract (`AssertionError`), a system under test that
//! rejected valid setup (`PreconditionError`), and an environment that is misconfigured or
//! unreachable (configuration, transport and database errors). All domain errors use
//! `thiserror` and are aggregated into [`Error`] through `#[from]` conversions so the `?`
//! operator works across the harness.

pub mod assertion;
pub mod config;
pub mod generator;
pub mod persistence;
pub mod precondition;

use thiserror::Error;

use crate::error::{
    assertion::AssertionError, config::ConfigError, generator::GeneratorError,
    persistence::PersistenceError, precondition::PreconditionError,
};

/// Main error type for the harness.
///
/// # Error Categories
/// - Assertion failures (status, JSON shape/content, envelope, database state)
/// - Precondition failures (dependency entities could not be created)
/// - Value generator failures (negative length, exhausted id search)
/// - Persistence failures (direct inserts that violate the reference schema)
/// - Fatal environment errors (configuration, HTTP transport, database connection)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// The system under test did not behave as the scenario expects.
    #[error(transparent)]
    AssertionError(#[from] AssertionError),
    /// The state a scenario needs could not be established.
    #[error(transparent)]
    PreconditionError(#[from] PreconditionError),
    /// A boundary value could not be generated.
    #[error(transparent)]
    GeneratorError(#[from] GeneratorError),
    /// A direct database write was rejected before reaching the database.
    #[error(transparent)]
    PersistenceError(#[from] PersistenceError),
    /// HTTP transport error (connection refused, TLS failure, body read failure).
    #[error(transparent)]
    TransportError(#[from] reqwest::Error),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// JSON (de)serialization error.
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),
    /// Internal error indicating a bug in Herald's code.
    #[error("Internal error with Herald's code, this indicates a bug: {0:?}")]
    InternalError(String),
}

impl Error {
    /// Whether the error means the environment is broken and the whole run must stop.
    ///
    /// Transport, database and configuration errors are fatal, including when they are
    /// the cause of a precondition failure.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::ConfigError(_) | Self::TransportError(_) | Self::DbErr(_) => true,
            Self::PreconditionError(PreconditionError::Setup { source, .. }) => source.is_fatal(),
            _ => false,
        }
    }

    /// Whether the error is an expectation mismatch rather than a setup or environment problem.
    pub fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionError(_))
    }

    /// Whether the error happened while establishing scenario preconditions.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::PreconditionError(_))
    }
}
