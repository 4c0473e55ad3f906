//! The normalized `{name, description, value}` shape every metric is reduced to.

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::MetricSpec;

/// One reduced metric as returned to callers.
///
/// `value` stays `None` until a reduction produced a number; it is never
/// filled with a placeholder zero on behalf of the reducer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitRecord {
    pub name: &'static str,
    pub description: &'static str,
    pub value: Option<String>,
}

impl UnitRecord {
    pub fn empty(spec: &MetricSpec) -> Self {
        Self {
            name: spec.name,
            description: spec.description,
            value: None,
        }
    }

    pub fn set(&mut self, value: f64, unit: &str) {
        self.value = Some(format_value(value, unit));
    }
}

/// Metric key to record, in catalog order.
pub type MetricSet = IndexMap<&'static str, UnitRecord>;

/// A set with every metric of `specs` present and unset.
pub fn empty_set(specs: &[MetricSpec]) -> MetricSet {
    specs
        .iter()
        .map(|spec| (spec.key, UnitRecord::empty(spec)))
        .collect()
}

/// Renders `"<number> <unit>"`, keeping a trailing `.0` on whole numbers.
pub fn format_value(value: f64, unit: &str) -> String {
    format!("{value:?} {unit}")
}
