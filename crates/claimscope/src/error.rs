//! Error types for the claims dashboard.

use thiserror::Error;

/// Dashboard result type alias.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Dashboard error type.
///
/// Every variant is recoverable at the session level: a failed render is
/// reported to the user and the next interaction starts from a clean slate.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// An aggregate was requested over a table with no rows.
    #[error("Cannot aggregate column {column}: table is empty")]
    EmptyTable {
        /// Column the aggregate was computed over.
        column: String,
    },

    /// A percentage was requested against a zero denominator.
    #[error("Division by zero: cannot express {part} as a percentage of 0")]
    DivisionByZero {
        /// Numerator of the rejected percentage.
        part: f64,
    },

    /// Navigation received a page name outside the recognized set.
    #[error("Invalid page: {0:?}")]
    InvalidPage(String),

    /// A filter range with min above max or a negative bound.
    #[error("Invalid range: [{min}, {max}]")]
    InvalidRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },

    /// Column name not known to the table.
    #[error("Unknown column {column:?} for {table} table")]
    UnknownColumn {
        /// Table the lookup was made against.
        table: &'static str,
        /// Rejected column name.
        column: String,
    },

    /// A keyed summary table without exactly one row per key.
    #[error("Malformed {table} summary: {reason}")]
    MalformedSummary {
        /// Summary the rows were meant for.
        table: &'static str,
        /// What was wrong with the rows.
        reason: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Render plan serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for DashboardError {
    fn from(e: toml::de::Error) -> Self {
        DashboardError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for DashboardError {
    fn from(e: toml::ser::Error) -> Self {
        DashboardError::Config(e.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Serialization(e.to_string())
    }
}
