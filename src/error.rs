//! Failure taxonomy shared by the adapters and the lookups built on them.

use crate::catalog::{Granularity, Molecule};

/// Smallest accepted grid radius; radius 8 yields a one-degree step.
pub const MIN_RADIUS: i64 = 8;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Rejected before any upstream call.
    #[error("Case {radius} of less than eight (8) cannot be used.")]
    InvalidRadius { radius: i64 },

    /// Rejected before any upstream call.
    #[error("Case {granularity} not available for {molecule} data.")]
    UnsupportedGranularity {
        molecule: Molecule,
        granularity: Granularity,
    },

    /// The upstream payload does not have the documented series shape.
    #[error("unexpected provider payload: {0}")]
    ProviderShape(String),

    /// The upstream answered with an explicit error object instead of data.
    #[error("{provider} provider reported an error: {reason}")]
    ProviderUnavailable {
        provider: &'static str,
        reason: String,
    },

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

impl LookupError {
    pub fn shape(message: impl Into<String>) -> Self {
        LookupError::ProviderShape(message.into())
    }
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;
