//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into the base
//! [`GrowboxError`] via `#[from]` (adapters box their error type into the
//! matching variant).

/// Top-level error for the growbox workspace.
#[derive(Debug, thiserror::Error)]
pub enum GrowboxError {
    /// The program document could not be parsed.
    #[error("program error")]
    Program(#[from] ProgramError),

    /// The program store failed to produce a document.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// An actuator or meter adapter reported a fault.
    #[error("hardware error")]
    Hardware(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while parsing a program document.
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// The document is not valid JSON or its `settings` object is malformed.
    #[error("malformed program document")]
    Parse(#[from] serde_json::Error),
}

/// Why a rule can never activate.
///
/// A rule carrying one of these issues is not an error: the engine treats it
/// as permanently false, reports it, and keeps the cycle alive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleIssue {
    /// A sensor rule without a condition object.
    #[error("sensor rule has no condition")]
    MissingCondition,

    /// A sensor condition naming no sensor.
    #[error("sensor condition names no sensor")]
    EmptySensorName,

    /// A date-range rule whose start date is not `YYYY-MM-DD`.
    #[error("start date {0:?} is not a YYYY-MM-DD date")]
    UnparsableStartDate(String),

    /// An actions list that sets no field at all.
    #[error("actions contribute no fields")]
    InertActions,
}
