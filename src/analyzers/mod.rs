//! The three lookups exposed to callers.
//!
//! - [`coord`]: everything sampled around one coordinate
//! - [`greenhouse`]: raw molecule series and the yearly snapshot
//! - [`health`]: the composite environmental health score

pub mod coord;
pub mod greenhouse;
pub mod health;
pub mod types;
pub mod utility;
