//! Abstract upstream contracts consumed by the adapters.

pub mod source;

#[cfg(test)]
pub(crate) mod stub;

pub use source::{ClimateQuery, EnvironmentSource};
