use std::time::Duration;

use anyhow::{Context, Result};

use crate::grid::SamplePoint;

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;
const DEFAULT_CLIMATE_MODEL: &str = "CMCC_CM2_VHR4";
const DEFAULT_HEALTH_LATITUDE: f64 = 40.0;
const DEFAULT_HEALTH_LONGITUDE: f64 = -74.0;

/// Base URLs of every upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub emissions: String,
    pub air_quality: String,
    pub marine: String,
    pub flood: String,
    pub climate: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            emissions: "https://api.anthropogenic.com/api".to_string(),
            air_quality: "https://air-quality-api.open-meteo.com/v1/air-quality".to_string(),
            marine: "https://marine-api.open-meteo.com/v1/marine".to_string(),
            flood: "https://flood-api.open-meteo.com/v1/flood".to_string(),
            climate: "https://climate-api.open-meteo.com/v1/climate".to_string(),
        }
    }
}

/// Climate model and the fixed point the health score's climate leg samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateSettings {
    pub model: String,
    pub health_reference: SamplePoint,
}

impl Default for ClimateSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_CLIMATE_MODEL.to_string(),
            health_reference: SamplePoint::new(DEFAULT_HEALTH_LATITUDE, DEFAULT_HEALTH_LONGITUDE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub request_timeout: Duration,
    pub endpoints: Endpoints,
    pub climate: ClimateSettings,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            emissions: env_string("TERRA_EMISSIONS_URL", &defaults.emissions),
            air_quality: env_string("TERRA_AIR_QUALITY_URL", &defaults.air_quality),
            marine: env_string("TERRA_MARINE_URL", &defaults.marine),
            flood: env_string("TERRA_FLOOD_URL", &defaults.flood),
            climate: env_string("TERRA_CLIMATE_URL", &defaults.climate),
        };

        let climate = ClimateSettings {
            model: env_string("TERRA_CLIMATE_MODEL", DEFAULT_CLIMATE_MODEL),
            health_reference: SamplePoint::new(
                env_parse("TERRA_HEALTH_LATITUDE", DEFAULT_HEALTH_LATITUDE)?,
                env_parse("TERRA_HEALTH_LONGITUDE", DEFAULT_HEALTH_LONGITUDE)?,
            ),
        };

        Ok(Self {
            listen_addr: env_string("TERRA_LISTEN_ADDR", DEFAULT_LISTEN_ADDR),
            request_timeout: Duration::from_secs(env_parse(
                "TERRA_REQUEST_TIMEOUT_SECONDS",
                DEFAULT_REQUEST_TIMEOUT_SECONDS,
            )?),
            endpoints,
            climate,
        })
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_string(name: &str, default: &str) -> String {
    env_value(name).unwrap_or_else(|| default.to_string())
}

fn env_parse<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env_value(name) {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("Invalid {name} value {value:?}")),
        None => Ok(default),
    }
}
