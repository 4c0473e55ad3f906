use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use serde_json::Value;

use super::source::{ClimateQuery, EnvironmentSource};
use crate::catalog::{Granularity, Molecule};
use crate::grid::CoordinateLists;

/// Canned provider payloads for tests. Counts every call it receives.
#[derive(Default)]
pub(crate) struct StubSource {
    emissions: HashMap<(Molecule, Granularity), Value>,
    air_quality: Option<Value>,
    marine: Option<Value>,
    flood: Option<Value>,
    climate: Option<Value>,
    calls: AtomicUsize,
    climate_queries: Mutex<Vec<ClimateQuery>>,
    point_queries: Mutex<Vec<CoordinateLists>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_emissions(
        mut self,
        molecule: Molecule,
        granularity: Granularity,
        body: Value,
    ) -> Self {
        self.emissions.insert((molecule, granularity), body);
        self
    }

    pub fn with_air_quality(mut self, body: Value) -> Self {
        self.air_quality = Some(body);
        self
    }

    pub fn with_marine(mut self, body: Value) -> Self {
        self.marine = Some(body);
        self
    }

    pub fn with_flood(mut self, body: Value) -> Self {
        self.flood = Some(body);
        self
    }

    pub fn with_climate(mut self, body: Value) -> Self {
        self.climate = Some(body);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn climate_queries(&self) -> Vec<ClimateQuery> {
        self.climate_queries.lock().unwrap().clone()
    }

    pub fn point_queries(&self) -> Vec<CoordinateLists> {
        self.point_queries.lock().unwrap().clone()
    }

    fn answer(&self, body: &Option<Value>, what: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        body.clone().ok_or_else(|| anyhow!("no stubbed {what} response"))
    }

    fn record_points(&self, points: &CoordinateLists) {
        self.point_queries.lock().unwrap().push(points.clone());
    }
}

#[async_trait::async_trait]
impl EnvironmentSource for StubSource {
    async fn emissions(&self, molecule: Molecule, granularity: Granularity) -> Result<Value> {
        let body = self.emissions.get(&(molecule, granularity)).cloned();
        self.answer(&body, "emissions")
    }

    async fn air_quality(&self, points: &CoordinateLists, _: &[&'static str]) -> Result<Value> {
        self.record_points(points);
        self.answer(&self.air_quality, "air quality")
    }

    async fn marine(&self, points: &CoordinateLists, _: &[&'static str]) -> Result<Value> {
        self.record_points(points);
        self.answer(&self.marine, "marine")
    }

    async fn flood(&self, points: &CoordinateLists, _: &[&'static str]) -> Result<Value> {
        self.record_points(points);
        self.answer(&self.flood, "flood")
    }

    async fn climate(&self, query: &ClimateQuery, _: &[&'static str]) -> Result<Value> {
        self.climate_queries.lock().unwrap().push(query.clone());
        self.answer(&self.climate, "climate")
    }
}
