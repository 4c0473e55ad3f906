use serde_json::Value;

use crate::adapters::types::EmissionRecord;
use crate::catalog::{Granularity, Molecule};
use crate::error::{LookupError, Result};
use crate::parser::parse_emissions;
use crate::services::EnvironmentSource;

/// Furthest a yearly lookup may reach into the past.
pub const MAX_YEARS_BACK: i64 = 40;

/// Clamps a requested look-back to `0..=MAX_YEARS_BACK`.
pub fn clamp_years_back(years_back: i64) -> i64 {
    years_back.clamp(0, MAX_YEARS_BACK)
}

/// Fetches the raw series for `molecule` at `granularity`.
///
/// Combinations the provider does not publish are rejected before any
/// request is made.
#[tracing::instrument(skip(source))]
pub async fn fetch_emissions<S>(
    source: &S,
    molecule: Molecule,
    granularity: Granularity,
) -> Result<Value>
where
    S: EnvironmentSource + ?Sized,
{
    if !molecule.supports(granularity) {
        return Err(LookupError::UnsupportedGranularity {
            molecule,
            granularity,
        });
    }
    Ok(source.emissions(molecule, granularity).await?)
}

/// Yearly measurements of one molecule, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySeries {
    pub molecule: Molecule,
    pub records: Vec<EmissionRecord>,
}

impl YearlySeries {
    /// Measurement `years_back` years before the latest one (0 is the latest).
    ///
    /// `years_back` is clamped to `0..=MAX_YEARS_BACK`.
    pub fn value_at(&self, years_back: i64) -> Result<f64> {
        let back = clamp_years_back(years_back) as usize;
        self.records
            .len()
            .checked_sub(back + 1)
            .map(|index| self.records[index].measurement)
            .ok_or_else(|| {
                LookupError::shape(format!(
                    "{} yearly series has {} entries, cannot look back {back} years",
                    self.molecule,
                    self.records.len()
                ))
            })
    }

    /// Unit of the oldest entry.
    pub fn unit(&self) -> Result<&str> {
        self.records
            .first()
            .map(|record| record.unit.as_str())
            .ok_or_else(|| LookupError::shape(format!("{} yearly series is empty", self.molecule)))
    }
}

/// Fetches the yearly series of `molecule` for year-over-year comparisons.
///
/// Unlike [`fetch_emissions`] this does not consult the granularity table:
/// the provider serves a yearly aggregate for every molecule even where it
/// does not advertise one.
#[tracing::instrument(skip(source))]
pub async fn fetch_yearly<S>(source: &S, molecule: Molecule) -> Result<YearlySeries>
where
    S: EnvironmentSource + ?Sized,
{
    let body = source.emissions(molecule, Granularity::Yearly).await?;
    Ok(YearlySeries {
        molecule,
        records: parse_emissions(body)?,
    })
}
