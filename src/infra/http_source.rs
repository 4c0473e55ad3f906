use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;

use crate::catalog::{Granularity, Molecule};
use crate::config::Endpoints;
use crate::fetch::{HttpClient, fetch_json};
use crate::grid::CoordinateLists;
use crate::services::{ClimateQuery, EnvironmentSource};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// [`EnvironmentSource`] backed by the public emissions and Open-Meteo APIs.
pub struct HttpSource<C> {
    client: C,
    endpoints: Endpoints,
}

impl<C: HttpClient> HttpSource<C> {
    pub fn new(client: C, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    async fn get(&self, url: Url) -> Result<Value> {
        fetch_json(&self.client, url).await
    }
}

fn grid_url(base: &str, points: &CoordinateLists, series: &str, metrics: &[&str]) -> Result<Url> {
    Url::parse_with_params(
        base,
        &[
            ("latitude", points.latitudes.as_str()),
            ("longitude", points.longitudes.as_str()),
            (series, metrics.join(",").as_str()),
        ],
    )
    .with_context(|| format!("Invalid provider URL {base}"))
}

fn emissions_url(base: &str, molecule: Molecule, granularity: Granularity) -> Result<Url> {
    let url = format!("{}/{}/{}", base.trim_end_matches('/'), molecule, granularity);
    Url::parse(&url).with_context(|| format!("Invalid emissions URL {url}"))
}

fn climate_url(base: &str, query: &ClimateQuery, metrics: &[&str]) -> Result<Url> {
    Url::parse_with_params(
        base,
        &[
            ("latitude", query.point.latitude.to_string()),
            ("longitude", query.point.longitude.to_string()),
            ("start_date", query.start_date.format(DATE_FORMAT).to_string()),
            ("end_date", query.end_date.format(DATE_FORMAT).to_string()),
            ("models", query.model.clone()),
            ("daily", metrics.join(",")),
        ],
    )
    .with_context(|| format!("Invalid climate URL {base}"))
}

#[async_trait]
impl<C: HttpClient> EnvironmentSource for HttpSource<C> {
    #[tracing::instrument(skip(self))]
    async fn emissions(&self, molecule: Molecule, granularity: Granularity) -> Result<Value> {
        self.get(emissions_url(&self.endpoints.emissions, molecule, granularity)?)
            .await
    }

    #[tracing::instrument(skip_all, fields(points = points.len()))]
    async fn air_quality(
        &self,
        points: &CoordinateLists,
        metrics: &[&'static str],
    ) -> Result<Value> {
        self.get(grid_url(&self.endpoints.air_quality, points, "hourly", metrics)?)
            .await
    }

    #[tracing::instrument(skip_all, fields(points = points.len()))]
    async fn marine(&self, points: &CoordinateLists, metrics: &[&'static str]) -> Result<Value> {
        self.get(grid_url(&self.endpoints.marine, points, "hourly", metrics)?)
            .await
    }

    #[tracing::instrument(skip_all, fields(points = points.len()))]
    async fn flood(&self, points: &CoordinateLists, metrics: &[&'static str]) -> Result<Value> {
        self.get(grid_url(&self.endpoints.flood, points, "daily", metrics)?)
            .await
    }

    #[tracing::instrument(skip_all, fields(start = %query.start_date, end = %query.end_date))]
    async fn climate(&self, query: &ClimateQuery, metrics: &[&'static str]) -> Result<Value> {
        self.get(climate_url(&self.endpoints.climate, query, metrics)?)
            .await
    }
}
