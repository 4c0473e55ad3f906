//! Provider adapters: fetch one provider's metrics and reduce them to unit records.
//!
//! Policies for missing data differ per adapter:
//!
//! | adapter | no samples at any point | provider error object |
//! |---|---|---|
//! | air quality | `value = None` | request fails |
//! | marine / flood | `value = None` | `value = None`, rest of the response kept |
//! | climate | `value = "0 <unit>"` | request fails |

pub mod air_quality;
pub mod climate;
pub mod emissions;
pub mod marine;
pub mod types;

use tracing::debug;

use crate::catalog::MetricSpec;
use crate::error::Result;
use crate::record::{MetricSet, empty_set};
use crate::stats::reduce;
use types::{PointSeries, series_per_point};

/// Reduces every metric of `specs` across all `points`.
///
/// Metrics without a single sample keep `value = None`.
pub(crate) fn summarize_points<P: PointSeries>(
    specs: &[MetricSpec],
    points: &[P],
) -> Result<MetricSet> {
    let mut set = empty_set(specs);
    for spec in specs {
        let series = series_per_point(points, spec.key)?;
        let Some(reduced) = reduce(&series) else {
            debug!(metric = spec.key, points = points.len(), "No samples for metric");
            continue;
        };
        if let Some(record) = set.get_mut(spec.key) {
            record.set(reduced.value, &reduced.unit);
        }
    }
    Ok(set)
}

/// Writes `reduced` entries into `set`, keeping each key's position.
pub(crate) fn merge(set: &mut MetricSet, reduced: MetricSet) {
    for (key, record) in reduced {
        set.insert(key, record);
    }
}
