//! Typed shapes of the provider responses.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{LookupError, Result};
use crate::stats::TimeSeries;

/// Explicit error object some providers send instead of data,
/// e.g. `{"error": true, "reason": "No data is available for this location"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorPayload {
    pub fn reason(&self) -> String {
        self.reason
            .clone()
            .unwrap_or_else(|| "no reason given".to_string())
    }
}

/// Multi-point requests answer with an array, single-point ones with an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Either per-point data or the provider's error object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProviderPayload<T> {
    Unavailable(ErrorPayload),
    Points(OneOrMany<T>),
}

/// One sample point of an hourly response (air quality, marine).
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyPoint {
    pub hourly: Map<String, Value>,
    #[serde(default)]
    pub hourly_units: HashMap<String, String>,
}

/// One sample point of a daily response (flood, climate).
#[derive(Debug, Clone, Deserialize)]
pub struct DailyPoint {
    pub daily: Map<String, Value>,
    #[serde(default)]
    pub daily_units: HashMap<String, String>,
}

/// Access to the named series of a decoded point.
pub trait PointSeries {
    fn series(&self, metric: &str) -> Result<TimeSeries>;
}

impl PointSeries for HourlyPoint {
    fn series(&self, metric: &str) -> Result<TimeSeries> {
        extract_series(&self.hourly, &self.hourly_units, "hourly", metric)
    }
}

impl PointSeries for DailyPoint {
    fn series(&self, metric: &str) -> Result<TimeSeries> {
        extract_series(&self.daily, &self.daily_units, "daily", metric)
    }
}

fn extract_series(
    values: &Map<String, Value>,
    units: &HashMap<String, String>,
    block: &str,
    metric: &str,
) -> Result<TimeSeries> {
    let raw = values
        .get(metric)
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::shape(format!("{block}.{metric} is missing or not a list")))?;

    let samples = raw
        .iter()
        .map(|sample| match sample {
            Value::Null => Ok(None),
            Value::Number(number) => Ok(number.as_f64()),
            other => Err(LookupError::shape(format!(
                "{block}.{metric} contains non-numeric sample {other}"
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    let unit = units
        .get(metric)
        .ok_or_else(|| LookupError::shape(format!("{block}_units.{metric} is missing")))?;

    Ok(TimeSeries::new(samples, unit.clone()))
}

/// Collects `metric` from every point, failing on the first malformed one.
pub fn series_per_point<P: PointSeries>(points: &[P], metric: &str) -> Result<Vec<TimeSeries>> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            point.series(metric).map_err(|e| match e {
                LookupError::ProviderShape(message) => {
                    LookupError::ProviderShape(format!("point {index}: {message}"))
                }
                other => other,
            })
        })
        .collect()
}

/// One entry of an emissions series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmissionRecord {
    #[serde(deserialize_with = "deserialize_measurement")]
    pub measurement: f64,
    pub unit: String,
}

// The emissions API sends measurements as strings for some molecules.
fn deserialize_measurement<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| D::Error::custom("measurement is not representable as f64")),
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("measurement {text:?} is not a number"))),
        other => Err(D::Error::custom(format!(
            "unexpected type for measurement: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_payload_is_detected() {
        let payload: ProviderPayload<HourlyPoint> =
            serde_json::from_value(json!({"error": true, "reason": "No data"})).unwrap();
        match payload {
            ProviderPayload::Unavailable(error) => assert_eq!(error.reason(), "No data"),
            ProviderPayload::Points(_) => panic!("error payload decoded as data"),
        }
    }

    #[test]
    fn test_single_point_object_and_point_array() {
        let point = json!({"hourly": {"x": [1.0]}, "hourly_units": {"x": "m"}});

        let one: ProviderPayload<HourlyPoint> = serde_json::from_value(point.clone()).unwrap();
        let many: ProviderPayload<HourlyPoint> =
            serde_json::from_value(json!([point.clone(), point])).unwrap();

        match (one, many) {
            (ProviderPayload::Points(one), ProviderPayload::Points(many)) => {
                assert_eq!(one.into_vec().len(), 1);
                assert_eq!(many.into_vec().len(), 2);
            }
            _ => panic!("points decoded as an error payload"),
        }
    }

    #[test]
    fn test_series_extraction_keeps_nulls() {
        let point: HourlyPoint = serde_json::from_value(json!({
            "hourly": {"time": ["2024-01-01T00:00"], "pm10": [1.5, null, 2]},
            "hourly_units": {"pm10": "μg/m³"}
        }))
        .unwrap();

        let series = point.series("pm10").unwrap();
        assert_eq!(series.values, vec![Some(1.5), None, Some(2.0)]);
        assert_eq!(series.unit, "μg/m³");
    }

    #[test]
    fn test_missing_metric_is_a_shape_error() {
        let points: Vec<DailyPoint> = serde_json::from_value(json!([
            {"daily": {"a": [1.0]}, "daily_units": {"a": "m"}},
            {"daily": {}, "daily_units": {}}
        ]))
        .unwrap();

        let err = series_per_point(&points, "a").unwrap_err();
        match err {
            LookupError::ProviderShape(message) => assert!(message.starts_with("point 1:")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_sample_is_a_shape_error() {
        let point: DailyPoint = serde_json::from_value(json!({
            "daily": {"a": [1.0, "high"]},
            "daily_units": {"a": "m"}
        }))
        .unwrap();
        assert!(matches!(point.series("a"), Err(LookupError::ProviderShape(_))));
    }

    #[test]
    fn test_measurement_accepts_number_or_string() {
        let records: Vec<EmissionRecord> = serde_json::from_value(json!([
            {"measurement": "415.7", "unit": "ppm"},
            {"measurement": 417.1, "unit": "ppm"}
        ]))
        .unwrap();
        assert_eq!(records[0].measurement, 415.7);
        assert_eq!(records[1].measurement, 417.1);

        let bad: std::result::Result<Vec<EmissionRecord>, _> =
            serde_json::from_value(json!([{"measurement": true, "unit": "ppm"}]));
        assert!(bad.is_err());
    }
}
