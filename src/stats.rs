//! Series reduction: per-point null-filtered mean, then mean of the point means.

use crate::analyzers::utility::{mean, round_to};

/// Raw samples for one metric at one sample point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub values: Vec<Option<f64>>,
    pub unit: String,
}

impl TimeSeries {
    pub fn new(values: Vec<Option<f64>>, unit: impl Into<String>) -> Self {
        Self {
            values,
            unit: unit.into(),
        }
    }

    /// Samples with nulls dropped.
    pub fn present(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Mean of the present samples, `None` when every sample is null.
    pub fn average(&self) -> Option<f64> {
        mean(&self.present())
    }
}

/// A reduced scalar, rounded to two decimals, with the unit of the first point.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduced {
    pub value: f64,
    pub unit: String,
}

/// Averages each point, then averages the point averages.
///
/// Points without a single sample are left out of the second average
/// rather than counted as zero. Returns `None` when no point has data.
pub fn reduce(series: &[TimeSeries]) -> Option<Reduced> {
    let unit = series.first()?.unit.clone();
    let point_means: Vec<f64> = series.iter().filter_map(TimeSeries::average).collect();
    let value = mean(&point_means)?;

    Some(Reduced {
        value: round_to(value, 2),
        unit,
    })
}
