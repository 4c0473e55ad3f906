use serde_json::Value;
use tracing::info;

use crate::adapters::emissions::{clamp_years_back, fetch_emissions, fetch_yearly};
use crate::analyzers::types::{GreenhouseSnapshot, MoleculeReading};
use crate::catalog::{Granularity, Molecule};
use crate::error::Result;
use crate::services::EnvironmentSource;

/// Raw provider series for one molecule, passed through untouched.
pub async fn lookup_molecule<S>(
    source: &S,
    molecule: Molecule,
    granularity: Granularity,
) -> Result<Value>
where
    S: EnvironmentSource + ?Sized,
{
    fetch_emissions(source, molecule, granularity).await
}

/// Yearly reading of every molecule `years_back` years before the latest.
#[tracing::instrument(skip(source))]
pub async fn snapshot<S>(source: &S, years_back: i64) -> Result<GreenhouseSnapshot>
where
    S: EnvironmentSource + ?Sized,
{
    let years_back = clamp_years_back(years_back);
    let mut snapshot = GreenhouseSnapshot::with_capacity(Molecule::ALL.len());

    for molecule in Molecule::ALL {
        let yearly = fetch_yearly(source, molecule).await?;
        let reading = MoleculeReading {
            value: yearly.value_at(years_back)?,
            unit: yearly.unit()?.to_string(),
        };
        snapshot.insert(molecule, reading);
    }

    info!(years_back, "Greenhouse snapshot built");
    Ok(snapshot)
}
