//! Static tables describing what each provider can be asked for.
//!
//! Metric keys double as the upstream query names, so the order of each
//! table is also the order the metrics appear in responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display metadata for one provider metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const PARTICULATE_DESCRIPTION: &str = "PM10 (particulate matter less than 10 micrometers) and PM2.5 (less than 2.5 micrometers) refer to tiny particles present in the air. Due to their minute size, these particles can be inhaled deep into the lungs, posing serious health risks.";

pub static AIR_QUALITY_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "pm10",
        name: "Particulate Matter (<10 micrometers)",
        description: PARTICULATE_DESCRIPTION,
    },
    MetricSpec {
        key: "pm2_5",
        name: "Particulate Matter (<2.5 micrometers)",
        description: PARTICULATE_DESCRIPTION,
    },
    MetricSpec {
        key: "carbon_monoxide",
        name: "Carbon Monoxide",
        description: "Carbon monoxide is a colorless, odorless gas produced during incomplete combustion of carbon-containing materials. When inhaled, CO binds with hemoglobin in the blood and reduces its oxygen-carrying capacity, leading to dizziness, confusion, unconsciousness and, at high concentrations, death. Chronic exposure to lower levels also harms cardiovascular health.",
    },
    MetricSpec {
        key: "nitrogen_dioxide",
        name: "Nitrogen Dioxide",
        description: "Nitrogen dioxide is a reddish-brown gas produced primarily by vehicle emissions and industrial combustion. Prolonged exposure irritates the lungs, reduces immunity to lung infections and exacerbates respiratory diseases like asthma. It also contributes to the formation of ground-level ozone.",
    },
    MetricSpec {
        key: "ozone",
        name: "Ozone",
        description: "Ground-level ozone is a major component of smog, formed by reactions between nitrogen oxides and volatile organic compounds in sunlight. While ozone high in the atmosphere protects us from ultraviolet radiation, ground-level ozone causes respiratory problems, triggers asthma and reduces lung function.",
    },
    MetricSpec {
        key: "dust",
        name: "Dust",
        description: "Dust is a common airborne particulate made of soil particles, organic material and other minute particles. Depending on its composition it can irritate, cause allergic reactions or carry pathogens. Seasonal dust storms can significantly degrade air quality in many regions.",
    },
    MetricSpec {
        key: "uv_index_clear_sky",
        name: "UV Index",
        description: "The clear-sky UV index indicates the potential strength of sunburn-producing ultraviolet radiation under cloudless conditions. Prolonged exposure to high UV levels burns skin, accelerates skin aging, leads to skin cancers like melanoma and damages the eyes.",
    },
];

pub static MARINE_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "wave_height",
        name: "Wave Height",
        description: "Wave height is the distance from the crest of a wave to its trough. Large waves are dangerous for shipping, coastal structures and recreation, and together with high tides or storm surges they erode beaches and flood coastal regions.",
    },
    MetricSpec {
        key: "wave_direction",
        name: "Wave Direction",
        description: "The direction from which waves are coming. It matters for navigation, offshore construction and coastal management, since coastlines and reefs oriented toward the incoming swell absorb more wave energy.",
    },
    MetricSpec {
        key: "wave_period",
        name: "Wave Period",
        description: "Wave period is the time between successive wave crests passing a fixed point. Longer-period waves carry more energy than short ones of the same height and hit structures, swimmers and boats harder.",
    },
];

pub static FLOOD_METRIC: MetricSpec = MetricSpec {
    key: "river_discharge",
    name: "River Discharge",
    description: "River discharge is the volume of water flowing through a river per unit of time. High discharge after heavy rain or snowmelt can lead to flooding, while consistently low discharge may indicate drought affecting agriculture, drinking water and aquatic life.",
};

pub static CLIMATE_METRICS: &[MetricSpec] = &[
    MetricSpec {
        key: "temperature_2m_mean",
        name: "Temperature (Mean)",
        description: "The average air temperature 2 meters above ground, the standard near-surface measure. Tracking it is central to following global warming; persistently high averages bring heatwaves, melting ice and shifting weather patterns.",
    },
    MetricSpec {
        key: "windspeed_10m_mean",
        name: "Windspeed (Mean)",
        description: "The average wind speed 10 meters above ground. Shifts in wind patterns affect weather systems, ocean currents, the spread of pollutants and the output of wind farms.",
    },
    MetricSpec {
        key: "shortwave_radiation_sum",
        name: "Shortwave Radiation",
        description: "The total solar energy reaching the surface over the period. It drives Earth's energy balance; more shortwave radiation at the surface can indicate reduced cloud cover or atmospheric reflectivity.",
    },
    MetricSpec {
        key: "relative_humidity_2m_mean",
        name: "Relative Humidity (Mean)",
        description: "The average relative humidity 2 meters above ground: moisture in the air compared to the maximum the air can hold at that temperature. It affects health, agriculture, disease spread and cloud formation.",
    },
    MetricSpec {
        key: "precipitation_sum",
        name: "Precipitation Sum",
        description: "The total rain, snow and sleet falling over the period. Precipitation patterns govern freshwater availability; changes in either direction bring floods, droughts and ecosystem shifts.",
    },
];

/// Metric keys of a table, in table order.
pub fn keys(specs: &[MetricSpec]) -> Vec<&'static str> {
    specs.iter().map(|spec| spec.key).collect()
}

/// Greenhouse gases tracked by the emissions provider.
///
/// Declaration order is significant: the health score weights each
/// molecule by its position in [`Molecule::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Molecule {
    Sf6,
    N2o,
    Co2,
    Ch4,
}

impl Molecule {
    pub const ALL: [Molecule; 4] = [Molecule::Sf6, Molecule::N2o, Molecule::Co2, Molecule::Ch4];

    pub fn as_str(self) -> &'static str {
        match self {
            Molecule::Sf6 => "sf6",
            Molecule::N2o => "n2o",
            Molecule::Co2 => "co2",
            Molecule::Ch4 => "ch4",
        }
    }

    /// Granularities the emissions provider publishes for this molecule.
    pub fn granularities(self) -> &'static [Granularity] {
        SUPPORTED_GRANULARITIES
            .iter()
            .find(|(molecule, _)| *molecule == self)
            .map(|(_, granularities)| *granularities)
            .unwrap_or(&[])
    }

    pub fn supports(self, granularity: Granularity) -> bool {
        self.granularities().contains(&granularity)
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling interval of an emissions series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Yearly,
    #[default]
    Monthly,
    Weekly,
}

impl Granularity {
    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Yearly => "yearly",
            Granularity::Monthly => "monthly",
            Granularity::Weekly => "weekly",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static SUPPORTED_GRANULARITIES: &[(Molecule, &[Granularity])] = &[
    (Molecule::Sf6, &[Granularity::Yearly, Granularity::Monthly]),
    (Molecule::N2o, &[Granularity::Yearly, Granularity::Monthly]),
    (
        Molecule::Co2,
        &[Granularity::Yearly, Granularity::Monthly, Granularity::Weekly],
    ),
    (Molecule::Ch4, &[Granularity::Monthly]),
];
