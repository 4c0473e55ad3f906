//! Trait and request types for the environmental data providers.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::Value;

use crate::catalog::{Granularity, Molecule};
use crate::grid::{CoordinateLists, SamplePoint};

/// Daily climate projection request for a single point.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateQuery {
    pub point: SamplePoint,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub model: String,
}

/// Raw access to every provider the lookups depend on.
///
/// Implementations return the provider's JSON untouched; decoding into
/// typed responses happens once, in the adapters.
#[async_trait::async_trait]
pub trait EnvironmentSource: Send + Sync {
    /// `GET /api/{molecule}/{granularity}`, oldest measurement first.
    async fn emissions(&self, molecule: Molecule, granularity: Granularity) -> Result<Value>;

    /// Hourly air quality for every point in `points`.
    async fn air_quality(&self, points: &CoordinateLists, metrics: &[&'static str])
    -> Result<Value>;

    /// Hourly wave data. May answer with an error object for inland points.
    async fn marine(&self, points: &CoordinateLists, metrics: &[&'static str]) -> Result<Value>;

    /// Daily river discharge. May answer with an error object.
    async fn flood(&self, points: &CoordinateLists, metrics: &[&'static str]) -> Result<Value>;

    /// Daily climate projection for one point over a date range.
    async fn climate(&self, query: &ClimateQuery, metrics: &[&'static str]) -> Result<Value>;
}
