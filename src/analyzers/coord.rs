use chrono::{Days, NaiveDate};
use tracing::info;

use crate::adapters::air_quality::fetch_air_quality;
use crate::adapters::climate::{fetch_climate, summarize_climate};
use crate::adapters::marine::fetch_marine;
use crate::analyzers::types::{CoordResponse, ManRelated, NotManRelated};
use crate::config::ClimateSettings;
use crate::error::Result;
use crate::grid::{SamplePoint, make_grid};
use crate::record::MetricSet;
use crate::services::{ClimateQuery, EnvironmentSource};

/// Days of climate projection averaged for a coordinate, starting today.
pub const FORECAST_DAYS: u64 = 7;

static TEMPERATURE_METRICS: &[&str] = &["temperature_2m_mean"];
static WEATHER_METRICS: &[&str] = &[
    "windspeed_10m_mean",
    "relative_humidity_2m_mean",
    "precipitation_sum",
];
static RADIATION_METRICS: &[&str] = &["shortwave_radiation_sum"];

/// Samples the 3×3 grid around `(latitude, longitude)` and reshapes the
/// air quality, marine and climate results into the response taxonomy.
///
/// Air quality and marine data cover the whole grid. Climate data is
/// taken at the center only, over `[today, today + 7 days]`.
#[tracing::instrument(skip(source, settings))]
pub async fn aggregate<S>(
    source: &S,
    settings: &ClimateSettings,
    latitude: f64,
    longitude: f64,
    radius: i64,
    today: NaiveDate,
) -> Result<CoordResponse>
where
    S: EnvironmentSource + ?Sized,
{
    let center = SamplePoint::new(latitude, longitude);
    let grid = make_grid(center, radius)?;
    let points = grid.coordinate_lists();

    let air = fetch_air_quality(source, &points).await?;
    let marine = fetch_marine(source, &points).await?;

    let query = ClimateQuery {
        point: center,
        start_date: today,
        end_date: today + Days::new(FORECAST_DAYS),
        model: settings.model.clone(),
    };
    let climate = summarize_climate(&fetch_climate(source, &query).await?)?;

    info!(step = grid.step, "Coordinate aggregated");

    Ok(CoordResponse {
        bounding_box: grid.bounding_box(),
        man_related: ManRelated {
            air,
            marine,
            temperature: pick(&climate, TEMPERATURE_METRICS),
            weather: pick(&climate, WEATHER_METRICS),
        },
        notman_related: NotManRelated {
            radiation: pick(&climate, RADIATION_METRICS),
        },
    })
}

fn pick(set: &MetricSet, keys: &[&str]) -> MetricSet {
    keys.iter()
        .filter_map(|key| set.get_key_value(*key))
        .map(|(key, record)| (*key, record.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AIR_QUALITY_METRICS;
    use crate::error::LookupError;
    use crate::services::stub::StubSource;
    use serde_json::{Value, json};

    fn air_point() -> Value {
        let mut hourly = serde_json::Map::new();
        let mut units = serde_json::Map::new();
        for spec in AIR_QUALITY_METRICS {
            hourly.insert(spec.key.to_string(), json!([2.0, 4.0]));
            units.insert(spec.key.to_string(), json!("μg/m³"));
        }
        json!({"hourly": hourly, "hourly_units": units})
    }

    fn climate_body() -> Value {
        json!({
            "daily": {
                "temperature_2m_mean": [10.0, 12.0],
                "windspeed_10m_mean": [5.0, 7.0],
                "shortwave_radiation_sum": [20.0, 22.0],
                "relative_humidity_2m_mean": [60.0, 62.0],
                "precipitation_sum": [null, null]
            },
            "daily_units": {
                "temperature_2m_mean": "°C",
                "windspeed_10m_mean": "km/h",
                "shortwave_radiation_sum": "MJ/m²",
                "relative_humidity_2m_mean": "%",
                "precipitation_sum": "mm"
            }
        })
    }

    fn no_data() -> Value {
        json!({"error": true, "reason": "No data is available for this location"})
    }

    fn source() -> StubSource {
        StubSource::new()
            .with_air_quality(Value::Array(vec![air_point(); 9]))
            .with_marine(no_data())
            .with_flood(no_data())
            .with_climate(climate_body())
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn test_response_taxonomy() {
        let source = source();
        let settings = ClimateSettings::default();
        let response = aggregate(&source, &settings, 40.0, -74.0, 8, today())
            .await
            .unwrap();

        assert_eq!(response.bounding_box.len(), 9);
        assert_eq!(response.bounding_box[4], [-74.0, 40.0]);
        assert_eq!(response.man_related.air["pm10"].value.as_deref(), Some("3.0 μg/m³"));
        assert_eq!(response.man_related.marine.len(), 4);
        assert!(response.man_related.marine.values().all(|r| r.value.is_none()));

        let temperature: Vec<_> = response.man_related.temperature.keys().copied().collect();
        assert_eq!(temperature, ["temperature_2m_mean"]);
        let weather: Vec<_> = response.man_related.weather.keys().copied().collect();
        assert_eq!(
            weather,
            ["windspeed_10m_mean", "relative_humidity_2m_mean", "precipitation_sum"]
        );
        assert_eq!(
            response.man_related.weather["precipitation_sum"].value.as_deref(),
            Some("0 mm")
        );
        assert_eq!(
            response.notman_related.radiation["shortwave_radiation_sum"].value.as_deref(),
            Some("21.0 MJ/m²")
        );
    }

    #[tokio::test]
    async fn test_grid_and_climate_queries() {
        let source = source();
        aggregate(&source, &ClimateSettings::default(), 40.0, -74.0, 9, today())
            .await
            .unwrap();

        let point_queries = source.point_queries();
        assert_eq!(point_queries.len(), 3);
        assert!(point_queries.iter().all(|lists| lists.len() == 9));
        assert_eq!(point_queries[0].latitudes, "39.5,39.5,39.5,40,40,40,40.5,40.5,40.5");

        let climate = source.climate_queries();
        assert_eq!(climate.len(), 1);
        assert_eq!(climate[0].point, SamplePoint::new(40.0, -74.0));
        assert_eq!(climate[0].start_date, today());
        assert_eq!(climate[0].end_date, NaiveDate::from_ymd_opt(2024, 6, 8).unwrap());
    }

    #[tokio::test]
    async fn test_small_radius_fails_before_any_request() {
        let source = source();
        let settings = ClimateSettings::default();
        let err = aggregate(&source, &settings, 40.0, -74.0, 7, today())
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::InvalidRadius { radius: 7 }));
        assert_eq!(source.calls(), 0);
    }

    #[test]
    fn test_serializes_box_key() {
        let response = CoordResponse {
            bounding_box: vec![[1.0, 2.0]],
            man_related: ManRelated {
                air: MetricSet::new(),
                marine: MetricSet::new(),
                temperature: MetricSet::new(),
                weather: MetricSet::new(),
            },
            notman_related: NotManRelated {
                radiation: MetricSet::new(),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["box"], json!([[1.0, 2.0]]));
        assert!(json["notman_related"]["radiation"].is_object());
    }
}
