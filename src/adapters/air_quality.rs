use crate::adapters::summarize_points;
use crate::adapters::types::HourlyPoint;
use crate::catalog::{AIR_QUALITY_METRICS, keys};
use crate::error::Result;
use crate::grid::CoordinateLists;
use crate::parser::parse_required_points;
use crate::record::MetricSet;
use crate::services::EnvironmentSource;

/// Fetches hourly air quality for all `points` in one request and reduces
/// each pollutant across them.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub async fn fetch_air_quality<S>(source: &S, points: &CoordinateLists) -> Result<MetricSet>
where
    S: EnvironmentSource + ?Sized,
{
    let metrics = keys(AIR_QUALITY_METRICS);
    let body = source.air_quality(points, &metrics).await?;
    let points: Vec<HourlyPoint> = parse_required_points("air quality", body)?;
    summarize_points(AIR_QUALITY_METRICS, &points)
}
