//! Error types for classifier flow construction.
//!
//! Construction has a single failure mode: a required argument is missing
//! or malformed. Builders check their preconditions before creating any
//! part of a flow, so an error never comes with a partial flow.

use sfc_types::{ParseError, PortNumber};
use thiserror::Error;
use tracing::warn;

/// Result type alias for classifier builders.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Precondition violations reported by the classifier builders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifierError {
    /// A required argument is absent or empty.
    #[error("{field} is required")]
    Required {
        /// The missing argument (e.g., "flow key", "tunnel destination").
        field: &'static str,
    },

    /// A port argument is not a port number.
    #[error("invalid port '{value}': {source}")]
    InvalidPort {
        /// The rejected value.
        value: String,
        /// The underlying parse error.
        #[source]
        source: ParseError,
    },
}

impl ClassifierError {
    /// Creates a required-argument error.
    pub fn required(field: &'static str) -> Self {
        Self::Required { field }
    }
}

/// Fails if `value` is empty.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> ClassifierResult<()> {
    if value.is_empty() {
        warn!("Rejecting classifier flow: {} is required", field);
        return Err(ClassifierError::required(field));
    }
    Ok(())
}

/// Parses a decimal port number.
pub(crate) fn parse_port(value: &str) -> ClassifierResult<PortNumber> {
    value.parse().map_err(|source| {
        warn!("Rejecting classifier flow: invalid port '{}'", value);
        ClassifierError::InvalidPort {
            value: value.to_string(),
            source,
        }
    })
}
