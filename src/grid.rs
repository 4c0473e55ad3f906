//! 3×3 sampling grid around a center coordinate.

use crate::error::{LookupError, MIN_RADIUS, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl SamplePoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The nine sample points for one query, south-west first, row by row.
///
/// Index 4 is always the center.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub step: f64,
    pub points: [SamplePoint; 9],
}

/// Degrees between neighboring sample points: `0.5^(radius - 8)`.
pub fn step_for(radius: i64) -> f64 {
    let exponent = (radius - MIN_RADIUS).clamp(0, i64::from(i32::MAX)) as i32;
    0.5f64.powi(exponent)
}

/// Builds the grid for `center`, rejecting radii below [`MIN_RADIUS`].
pub fn make_grid(center: SamplePoint, radius: i64) -> Result<GridSpec> {
    if radius < MIN_RADIUS {
        return Err(LookupError::InvalidRadius { radius });
    }

    let step = step_for(radius);
    let offsets = [-step, 0.0, step];
    let mut points = [center; 9];
    for (row, lat_offset) in offsets.iter().enumerate() {
        for (col, lon_offset) in offsets.iter().enumerate() {
            points[row * 3 + col] =
                SamplePoint::new(center.latitude + lat_offset, center.longitude + lon_offset);
        }
    }

    Ok(GridSpec { step, points })
}

impl GridSpec {
    /// Sample points as `[longitude, latitude]` pairs in grid order.
    pub fn bounding_box(&self) -> Vec<[f64; 2]> {
        self.points
            .iter()
            .map(|point| [point.longitude, point.latitude])
            .collect()
    }

    pub fn coordinate_lists(&self) -> CoordinateLists {
        CoordinateLists::from_points(&self.points)
    }
}

/// Comma-joined latitude and longitude query values for a set of points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateLists {
    pub latitudes: String,
    pub longitudes: String,
}

impl CoordinateLists {
    pub fn from_points(points: &[SamplePoint]) -> Self {
        let join = |pick: fn(&SamplePoint) -> f64| {
            points
                .iter()
                .map(|point| pick(point).to_string())
                .collect::<Vec<_>>()
                .join(",")
        };

        Self {
            latitudes: join(|point| point.latitude),
            longitudes: join(|point| point.longitude),
        }
    }

    pub fn single(point: SamplePoint) -> Self {
        Self::from_points(&[point])
    }

    pub fn len(&self) -> usize {
        if self.latitudes.is_empty() {
            0
        } else {
            self.latitudes.split(',').count()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }
}
