//! Core traits for the annotation pipeline.
//!
//! These are intentionally minimal. The sequencer only needs a point-to-point
//! cost; concrete apps can plug in something smarter than great-circle
//! distance once a road graph is available.

use crate::track::Point;

/// Provides an estimated cost between two points, in meters.
///
/// The sequencer minimizes tour length under this estimate. The true
/// road-network cost is unknown before a route request is issued, so the
/// default implementation is great-circle distance.
pub trait DistanceEstimator {
    fn distance_m(&self, from: Point, to: Point) -> f64;
}
