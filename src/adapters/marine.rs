use tracing::warn;

use crate::adapters::types::{DailyPoint, HourlyPoint, series_per_point};
use crate::adapters::{merge, summarize_points};
use crate::catalog::{FLOOD_METRIC, MARINE_METRICS, keys};
use crate::error::{LookupError, Result};
use crate::grid::CoordinateLists;
use crate::parser::parse_required_points;
use crate::record::{MetricSet, UnitRecord, empty_set};
use crate::services::EnvironmentSource;
use crate::stats::{TimeSeries, reduce};

/// Fetches wave statistics and today's river discharge for all `points`.
///
/// Both providers only cover part of the globe. When either answers with
/// an error object its metrics stay unset and the rest is still returned.
#[tracing::instrument(skip_all, fields(points = points.len()))]
pub async fn fetch_marine<S>(source: &S, points: &CoordinateLists) -> Result<MetricSet>
where
    S: EnvironmentSource + ?Sized,
{
    let mut set = empty_set(MARINE_METRICS);
    set.insert(FLOOD_METRIC.key, UnitRecord::empty(&FLOOD_METRIC));

    let body = source.marine(points, &keys(MARINE_METRICS)).await?;
    if let Some(wave_points) =
        recover_unavailable(parse_required_points::<HourlyPoint>("marine", body))?
    {
        merge(&mut set, summarize_points(MARINE_METRICS, &wave_points)?);
    }

    let body = source.flood(points, &[FLOOD_METRIC.key]).await?;
    if let Some(flood_points) =
        recover_unavailable(parse_required_points::<DailyPoint>("flood", body))?
    {
        let today = series_per_point(&flood_points, FLOOD_METRIC.key)?
            .into_iter()
            .map(first_day)
            .collect::<Vec<_>>();
        if let (Some(reduced), Some(record)) = (reduce(&today), set.get_mut(FLOOD_METRIC.key)) {
            record.set(reduced.value, &reduced.unit);
        }
    }

    Ok(set)
}

fn recover_unavailable<T>(result: Result<Vec<T>>) -> Result<Option<Vec<T>>> {
    match result {
        Ok(points) => Ok(Some(points)),
        Err(LookupError::ProviderUnavailable { provider, reason }) => {
            warn!(provider, %reason, "Provider has no data for this area");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn first_day(series: TimeSeries) -> TimeSeries {
    TimeSeries {
        values: series.values.into_iter().take(1).collect(),
        unit: series.unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SamplePoint;
    use crate::services::stub::StubSource;
    use serde_json::{Value, json};

    fn wave_point(height: f64) -> Value {
        json!({
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "wave_height": [height, height + 1.0],
                "wave_direction": [180.0, null],
                "wave_period": [8.0, 9.0]
            },
            "hourly_units": {"wave_height": "m", "wave_direction": "°", "wave_period": "s"}
        })
    }

    fn flood_point(discharge: Value) -> Value {
        json!({
            "daily": {"time": ["2024-06-01", "2024-06-02"], "river_discharge": discharge},
            "daily_units": {"river_discharge": "m³/s"}
        })
    }

    fn points() -> CoordinateLists {
        CoordinateLists::from_points(&[SamplePoint::new(1.0, 1.0), SamplePoint::new(2.0, 2.0)])
    }

    #[tokio::test]
    async fn test_flood_error_leaves_discharge_unset() {
        let source = StubSource::new()
            .with_marine(json!([wave_point(1.0), wave_point(3.0)]))
            .with_flood(json!({"error": true, "reason": "No data for this location"}));

        let set = fetch_marine(&source, &points()).await.unwrap();

        assert_eq!(set["wave_height"].value.as_deref(), Some("2.5 m"));
        assert_eq!(set["wave_direction"].value.as_deref(), Some("180.0 °"));
        assert_eq!(set["wave_period"].value.as_deref(), Some("8.5 s"));
        assert_eq!(set["river_discharge"].value, None);
    }

    #[tokio::test]
    async fn test_marine_error_keeps_discharge() {
        let source = StubSource::new()
            .with_marine(json!({"error": true, "reason": "inland"}))
            .with_flood(json!([
                flood_point(json!([10.0, 99.0])),
                flood_point(json!([null, 99.0])),
            ]));

        let set = fetch_marine(&source, &points()).await.unwrap();

        assert_eq!(set["wave_height"].value, None);
        assert_eq!(set["river_discharge"].value.as_deref(), Some("10.0 m³/s"));
        let keys: Vec<_> = set.keys().copied().collect();
        assert_eq!(keys, ["wave_height", "wave_direction", "wave_period", "river_discharge"]);
    }

    #[tokio::test]
    async fn test_malformed_marine_payload_is_not_recovered() {
        let source = StubSource::new()
            .with_marine(json!([{"hourly": {"wave_height": "tall"}, "hourly_units": {}}]))
            .with_flood(json!({"error": true}));

        let err = fetch_marine(&source, &points()).await.unwrap_err();
        assert!(matches!(err, LookupError::ProviderShape(_)));
    }
}
