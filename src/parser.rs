//! Decoding of raw provider JSON into the typed responses in [`crate::adapters::types`].
//!
//! Every provider payload passes through here exactly once; anything that
//! does not match the documented shape becomes [`LookupError::ProviderShape`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::adapters::types::{EmissionRecord, ProviderPayload};
use crate::error::{LookupError, Result};

/// Decodes `body` as `T`, naming `provider` in the error.
pub fn decode<T: DeserializeOwned>(provider: &str, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| LookupError::shape(format!("{provider} response: {e}")))
}

/// Decodes a per-point provider response that may carry an error object instead.
pub fn parse_points<T: DeserializeOwned>(
    provider: &str,
    body: Value,
) -> Result<ProviderPayload<T>> {
    decode(provider, body)
}

/// Decodes a per-point response, turning an error object into
/// [`LookupError::ProviderUnavailable`].
pub fn parse_required_points<T: DeserializeOwned>(
    provider: &'static str,
    body: Value,
) -> Result<Vec<T>> {
    match parse_points(provider, body)? {
        ProviderPayload::Points(points) => Ok(points.into_vec()),
        ProviderPayload::Unavailable(error) => Err(LookupError::ProviderUnavailable {
            provider,
            reason: error.reason(),
        }),
    }
}

/// Decodes an emissions series, oldest first.
pub fn parse_emissions(body: Value) -> Result<Vec<EmissionRecord>> {
    decode("emissions", body)
}
