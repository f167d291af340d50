//! Core error types for the payout engine.
//!
//! The engine performs no I/O, so every error here is a caller error: either a
//! selector the engine does not understand (window kind, granularity, sort key,
//! timezone) or an input record that violates a structural invariant.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Selector values the engine cannot interpret.
///
/// These are programming errors on the caller's side and should be caught at
/// the boundary, before a computation is attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Unknown time window kind '{0}'")]
    UnknownWindowKind(String),

    #[error("Unknown bucket granularity '{0}'")]
    UnknownGranularity(String),

    #[error("Unknown sort key '{key}' for {entity}")]
    UnknownSortKey { entity: &'static str, key: String },

    #[error("Unknown sort direction '{0}'")]
    UnknownSortDirection(String),

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Custom date range is missing its {0} bound")]
    MissingCustomBound(&'static str),
}

/// Validation errors for input records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Trade {trade_id} has non-positive lot size {lots}")]
    NonPositiveLots { trade_id: String, lots: String },

    #[error("Trade {trade_id} closes before it opens")]
    CloseBeforeOpen { trade_id: String },

    #[error("Cashflow {cashflow_id} has negative amount {amount}")]
    NegativeCashflow { cashflow_id: String, amount: String },

    #[error("Profit share percent {0} is outside 0-100")]
    ProfitShareOutOfRange(String),

    #[error("Rebate per lot {0} is negative")]
    NegativeRebateRate(String),
}
