use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the gaswatch workspace.
///
/// Covers schema violations in input tables, connector failures, statistics
/// requested over empty partitions, and undefined growth rates. None of these
/// are ever downgraded to a silent default by the pipeline.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GasError {
    /// A required column or key is missing, renamed, mistyped, or collides.
    #[error("schema error: {0}")]
    Schema(String),

    /// A connector call failed (transport, HTTP status, or API error body).
    #[error("{source_name} connection failed: {msg}")]
    Connection {
        /// Connector or endpoint name that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A partition or column has zero valid rows for the requested statistic.
    #[error("no data: {what}")]
    NoData {
        /// Description of the empty selection, e.g. "before 2021-08-05 for BlockSize".
        what: String,
    },

    /// A growth rate was requested over a partition whose first value is zero.
    #[error("division undefined: {what}")]
    DivisionUndefined {
        /// Description of the partition whose denominator was zero.
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data that are not schema related.
    #[error("data issue: {0}")]
    Data(String),

    /// Reading or writing a persisted artifact failed.
    #[error("io error: {0}")]
    Io(String),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
    },

    /// A resource could not be found.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "gas history for eth".
        what: String,
    },

    /// All registered gas history providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<GasError>),
}

impl GasError {
    /// Helper: build a `Schema` error.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Helper: build a `Connection` error with the source name and message.
    pub fn connection(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connection {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NoData` error for a description of the empty selection.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `DivisionUndefined` error.
    pub fn division_undefined(what: impl Into<String>) -> Self {
        Self::DivisionUndefined { what: what.into() }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Empty partitions and not-found conditions are expected outcomes of an
    /// analysis window; aggregates are classified by their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::NoData { .. } | Self::NotFound { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}

impl From<std::io::Error> for GasError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<serde_json::Error> for GasError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => Self::Schema(e.to_string()),
            serde_json::error::Category::Io => Self::Io(e.to_string()),
            serde_json::error::Category::Syntax | serde_json::error::Category::Eof => {
                Self::Data(e.to_string())
            }
        }
    }
}
