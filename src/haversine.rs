//! Great-circle distance primitive.
//!
//! The only geometry this crate computes itself. Ignores roads and terrain
//! but is always available client-side, which is why the sequencer uses it
//! as its default cost estimate.

use crate::track::Point;
use crate::traits::DistanceEstimator;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle distance between two points, in meters.
///
/// Pure and total: any valid lon/lat pair is fine, coincident points
/// return 0.
pub fn haversine_m(from: Point, to: Point) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Sum of consecutive haversine legs along a polyline.
///
/// Zero for fewer than two points.
pub fn path_length_m(points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|pair| haversine_m(pair[0], pair[1]))
        .sum()
}

/// Great-circle cost estimator for the sequencer.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl DistanceEstimator for GreatCircle {
    fn distance_m(&self, from: Point, to: Point) -> f64 {
        haversine_m(from, to)
    }
}
