use crate::adapters::types::{DailyPoint, PointSeries};
use crate::catalog::{CLIMATE_METRICS, keys};
use crate::error::{LookupError, Result};
use crate::parser::parse_required_points;
use crate::record::{MetricSet, empty_set};
use crate::services::{ClimateQuery, EnvironmentSource};
use crate::stats::reduce;

/// Fetches the daily climate projection for one point and date range.
#[tracing::instrument(skip(source), fields(model = %query.model))]
pub async fn fetch_climate<S>(source: &S, query: &ClimateQuery) -> Result<DailyPoint>
where
    S: EnvironmentSource + ?Sized,
{
    let body = source.climate(query, &keys(CLIMATE_METRICS)).await?;
    let points: Vec<DailyPoint> = parse_required_points("climate", body)?;
    let count = points.len();
    let mut points = points.into_iter();
    match (points.next(), points.next()) {
        (Some(point), None) => Ok(point),
        _ => Err(LookupError::shape(format!(
            "climate response: expected one point, got {count}"
        ))),
    }
}

/// Averages every climate metric over the date range.
///
/// A metric with no samples reads `"0 <unit>"` rather than staying unset.
pub fn summarize_climate(point: &DailyPoint) -> Result<MetricSet> {
    let mut set = empty_set(CLIMATE_METRICS);
    for spec in CLIMATE_METRICS {
        let series = point.series(spec.key)?;
        let Some(record) = set.get_mut(spec.key) else {
            continue;
        };
        match reduce(std::slice::from_ref(&series)) {
            Some(reduced) => record.set(reduced.value, &reduced.unit),
            None => record.value = Some(format!("0 {}", series.unit)),
        }
    }
    Ok(set)
}
