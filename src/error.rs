//! Centralized error handling for the nickel dashboard.
//!
//! ## Error categories
//!
//! Only loading the dataset can fail. Everything downstream of the loader
//! (filtering, aggregation, KPIs) is total: degenerate inputs produce empty
//! or zero-valued results rather than errors.
//!
//! ```
//! use nickel_dash::error::DashboardError;
//!
//! fn describe(err: &DashboardError) -> &'static str {
//!     match err {
//!         DashboardError::NotFound(_) => "dataset is missing",
//!         DashboardError::MissingColumn(_) | DashboardError::MalformedRow { .. } => {
//!             "dataset is malformed"
//!         }
//!         _ => "other failure",
//!     }
//! }
//! ```
//!
//! ## Context extension trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`DashboardError`]:
//!
//! ```no_run
//! use nickel_dash::error::ResultExt as _;
//!
//! fn read_raw() -> nickel_dash::error::Result<String> {
//!     std::fs::read_to_string("production-of-nickel-mine.csv").context("Failed to read dataset")
//! }
//! ```

use std::fmt;
use std::path::PathBuf;

/// Main error type for dashboard operations.
#[derive(Debug)]
pub enum DashboardError {
    /// I/O errors (reading the dataset, writing an export)
    Io(std::io::Error),

    /// The source file does not exist
    NotFound(PathBuf),

    /// A required column is absent from the source table
    MissingColumn(String),

    /// A row has an empty or non-numeric value in a required column
    MalformedRow {
        /// 1-based data row (the header is not counted)
        row: usize,
        column: String,
    },

    /// Dataframe engine errors (CSV parsing, casting, writing)
    DataProcessing(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::NotFound(path) => write!(f, "Dataset not found: {}", path.display()),
            Self::MissingColumn(name) => write!(f, "Required column '{name}' is missing"),
            Self::MalformedRow { row, column } => {
                write!(f, "Malformed value in column '{column}' at row {row}")
            }
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl DashboardError {
    /// Whether this error comes from reading or parsing the dataset.
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::MissingColumn(_) | Self::MalformedRow { .. }
        )
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for DashboardError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for DashboardError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DashboardError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DashboardError = e.into();
            DashboardError::Other(format!("{}: {}", f(), err))
        })
    }
}
