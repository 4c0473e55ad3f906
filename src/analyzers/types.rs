//! Response shapes produced by the lookups.

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::Molecule;
use crate::record::MetricSet;

/// Everything known about a coordinate, split by whether people drive it.
#[derive(Debug, Clone, Serialize)]
pub struct CoordResponse {
    /// Sample points as `[longitude, latitude]`, in grid order.
    #[serde(rename = "box")]
    pub bounding_box: Vec<[f64; 2]>,
    pub man_related: ManRelated,
    pub notman_related: NotManRelated,
}

#[derive(Debug, Clone, Serialize)]
pub struct ManRelated {
    pub air: MetricSet,
    pub marine: MetricSet,
    pub temperature: MetricSet,
    pub weather: MetricSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotManRelated {
    pub radiation: MetricSet,
}

/// Composite environmental health score, rounded to three decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthScore {
    pub health: f64,
}

/// The five normalized difference terms the health score blends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthTerms {
    pub mdiff: f64,
    pub tdiff: f64,
    pub pdiff: f64,
    pub wdiff: f64,
    pub rdiff: f64,
}

/// One molecule's measurement in a greenhouse snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeReading {
    pub value: f64,
    pub unit: String,
}

/// Yearly reading of every tracked molecule, in [`Molecule::ALL`] order.
pub type GreenhouseSnapshot = IndexMap<Molecule, MoleculeReading>;
