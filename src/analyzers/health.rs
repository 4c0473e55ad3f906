//! Composite environmental health score.
//!
//! Five difference terms, each of the form `|100 - new / old|`:
//!
//! - `Mdiff`: greenhouse gases, latest yearly value against `years_back` years ago
//! - `Tdiff`, `Pdiff`, `Wdiff`, `Rdiff`: last against first day of the daily
//!   temperature, precipitation, wind and radiation series since 1950
//!
//! blended with weights that switch regime at [`REGIME_SWITCH_YEARS`].

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::adapters::climate::fetch_climate;
use crate::adapters::emissions::{clamp_years_back, fetch_yearly};
use crate::adapters::types::{DailyPoint, PointSeries};
use crate::analyzers::types::{HealthScore, HealthTerms};
use crate::analyzers::utility::{mean, round_to};
use crate::catalog::Molecule;
use crate::config::ClimateSettings;
use crate::error::{LookupError, Result};
use crate::services::{ClimateQuery, EnvironmentSource};

/// Look-backs of this many years or more drop the greenhouse term.
pub const REGIME_SWITCH_YEARS: i64 = 20;

const DAYS_PER_YEAR: u64 = 365;

/// Per-term weights; each regime sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub molecules: f64,
    pub temperature: f64,
    pub precipitation: f64,
    pub wind: f64,
    pub radiation: f64,
}

impl Weights {
    pub fn for_years_back(years_back: i64) -> Self {
        if years_back < REGIME_SWITCH_YEARS {
            Self {
                molecules: 0.4,
                temperature: 0.4,
                precipitation: 0.1,
                wind: 0.05,
                radiation: 0.05,
            }
        } else {
            Self {
                molecules: 0.0,
                temperature: 0.6,
                precipitation: 0.2,
                wind: 0.1,
                radiation: 0.1,
            }
        }
    }

    pub fn sum(&self) -> f64 {
        self.molecules + self.temperature + self.precipitation + self.wind + self.radiation
    }
}

impl HealthTerms {
    /// Weighted blend of the terms, rounded to three decimals.
    pub fn combine(&self, weights: &Weights) -> f64 {
        round_to(
            weights.molecules * self.mdiff
                + weights.temperature * self.tdiff
                + weights.precipitation * self.pdiff
                + weights.wind * self.wdiff
                + weights.radiation * self.rdiff,
            3,
        )
    }
}

/// `|100 - new / old|`, or `None` when `old` is zero.
pub fn ratio_difference(old: f64, new: f64) -> Option<f64> {
    (old != 0.0).then(|| (100.0 - new / old).abs())
}

/// Mean of the per-molecule differences, each scaled by `1 - 0.1 * position`
/// in [`Molecule::ALL`] order.
pub fn molecule_difference(readings: &[(Molecule, f64, f64)]) -> Result<f64> {
    let mut weighted = Vec::with_capacity(readings.len());
    for (position, (molecule, old, new)) in readings.iter().enumerate() {
        let difference = ratio_difference(*old, *new).ok_or_else(|| {
            LookupError::shape(format!("{molecule} reading from the past is zero"))
        })?;
        weighted.push(difference * (1.0 - position as f64 * 0.1));
    }
    Ok(mean(&weighted).unwrap_or(0.0).abs())
}

/// Difference between the last and first raw sample of `metric`.
pub fn series_difference(point: &DailyPoint, metric: &str) -> Result<f64> {
    let series = point.series(metric)?;
    match (series.values.first(), series.values.last()) {
        (Some(Some(first)), Some(Some(last))) => ratio_difference(*first, *last)
            .ok_or_else(|| LookupError::shape(format!("daily.{metric} starts at zero"))),
        _ => Err(LookupError::shape(format!(
            "daily.{metric} has no first or last sample"
        ))),
    }
}

/// Computes the five difference terms for `years_back` (clamped to 0..=40).
#[tracing::instrument(skip(source, settings))]
pub async fn compute_terms<S>(
    source: &S,
    settings: &ClimateSettings,
    years_back: i64,
    today: NaiveDate,
) -> Result<HealthTerms>
where
    S: EnvironmentSource + ?Sized,
{
    let years_back = clamp_years_back(years_back);

    let mut readings = Vec::with_capacity(Molecule::ALL.len());
    for molecule in Molecule::ALL {
        let yearly = fetch_yearly(source, molecule).await?;
        readings.push((molecule, yearly.value_at(years_back)?, yearly.value_at(0)?));
    }
    let mdiff = molecule_difference(&readings)?;

    let query = ClimateQuery {
        point: settings.health_reference,
        start_date: climate_history_start(),
        end_date: today - Days::new(DAYS_PER_YEAR * years_back as u64),
        model: settings.model.clone(),
    };
    let climate = fetch_climate(source, &query).await?;

    let tdiff = series_difference(&climate, "temperature_2m_mean")?;
    let pdiff = series_difference(&climate, "precipitation_sum")?;
    let wdiff = series_difference(&climate, "windspeed_10m_mean")?;
    let rdiff = match series_difference(&climate, "shortwave_radiation_sum") {
        Ok(rdiff) => rdiff,
        Err(e) => {
            debug!(error = %e, "Radiation series unusable, averaging the other terms");
            (tdiff + pdiff + mdiff + wdiff) / 4.0
        }
    };

    Ok(HealthTerms {
        mdiff,
        tdiff,
        pdiff,
        wdiff,
        rdiff,
    })
}

/// Scores environmental health `years_back` years into the past (0 = now).
#[tracing::instrument(skip(source, settings))]
pub async fn score<S>(
    source: &S,
    settings: &ClimateSettings,
    years_back: i64,
    today: NaiveDate,
) -> Result<HealthScore>
where
    S: EnvironmentSource + ?Sized,
{
    let years_back = clamp_years_back(years_back);
    let terms = compute_terms(source, settings, years_back, today).await?;
    let weights = Weights::for_years_back(years_back);
    let health = terms.combine(&weights);

    info!(?terms, health, "Health scored");
    Ok(HealthScore { health })
}

fn climate_history_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(1950, 12, 31).unwrap_or(NaiveDate::MIN)
}
