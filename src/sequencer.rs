//! Waypoint sequencing heuristics.
//!
//! Orders the free waypoints between the fixed anchors to shorten the tour,
//! using either nearest-neighbor (O(n²)) or greedy cheapest insertion
//! (O(n³)). Heuristics only: the true road-network cost is unknown before a
//! route request, so the estimator (normally great-circle distance) stands
//! in for it. Both heuristics are deterministic; ties go to the lowest
//! original index.

use std::error::Error;
use std::fmt;

use crate::track::Point;
use crate::traits::DistanceEstimator;
use crate::waypoints::{Waypoint, WaypointSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceAlgorithm {
    NearestNeighbor,
    GreedyInsertion,
}

/// Sequencing without both anchors is meaningless, so missing anchors are a
/// contract violation rather than a fail-soft case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    MissingStart,
    MissingEnd,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::MissingStart => write!(f, "waypoint set has no start anchor"),
            SequenceError::MissingEnd => write!(f, "waypoint set has no end anchor"),
        }
    }
}

impl Error for SequenceError {}

/// Returns the set's free waypoints in sequenced order.
///
/// The result is a permutation of the free list; anchors are read-only
/// context and never part of the output. The set itself is not modified —
/// apply the result with [`WaypointSet::apply_order`] if wanted.
pub fn sequence<M: DistanceEstimator>(
    set: &WaypointSet,
    algorithm: SequenceAlgorithm,
    metric: &M,
) -> Result<Vec<Waypoint>, SequenceError> {
    let start = set.start().ok_or(SequenceError::MissingStart)?;
    let end = set.end().ok_or(SequenceError::MissingEnd)?;

    let free = set.free();
    if free.len() <= 1 {
        return Ok(free.to_vec());
    }

    let points: Vec<Point> = free.iter().map(|w| w.point).collect();
    let order = sequence_order(start, end, &points, algorithm, metric);
    Ok(order.into_iter().map(|i| free[i].clone()).collect())
}

/// Sequenced permutation of bare points, for callers not using
/// [`WaypointSet`].
pub fn sequence_points<M: DistanceEstimator>(
    start: Point,
    end: Point,
    free: &[Point],
    algorithm: SequenceAlgorithm,
    metric: &M,
) -> Vec<Point> {
    sequence_order(start, end, free, algorithm, metric)
        .into_iter()
        .map(|i| free[i])
        .collect()
}

/// The sequenced order as indices into `free`.
pub fn sequence_order<M: DistanceEstimator>(
    start: Point,
    end: Point,
    free: &[Point],
    algorithm: SequenceAlgorithm,
    metric: &M,
) -> Vec<usize> {
    if free.len() <= 1 {
        return (0..free.len()).collect();
    }
    match algorithm {
        SequenceAlgorithm::NearestNeighbor => nearest_neighbor_order(start, free, metric),
        SequenceAlgorithm::GreedyInsertion => greedy_insertion_order(start, end, free, metric),
    }
}

/// Repeatedly picks the remaining point closest to the current position,
/// starting from the start anchor.
fn nearest_neighbor_order<M: DistanceEstimator>(
    start: Point,
    points: &[Point],
    metric: &M,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut order = Vec::with_capacity(points.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_cost = f64::INFINITY;
        // `remaining` stays in ascending original order, so strict `<`
        // gives the first-minimal-index tie-break.
        for (pos, &idx) in remaining.iter().enumerate() {
            let cost = metric.distance_m(current, points[idx]);
            if cost < best_cost {
                best_cost = cost;
                best_pos = pos;
            }
        }
        let idx = remaining.remove(best_pos);
        current = points[idx];
        order.push(idx);
    }
    order
}

/// Grows a working tour from `[start, end]` by repeatedly inserting the
/// (point, edge) pair with the cheapest detour
/// `d(prev, p) + d(p, next) - d(prev, next)`.
fn greedy_insertion_order<M: DistanceEstimator>(
    start: Point,
    end: Point,
    points: &[Point],
    metric: &M,
) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut tour: Vec<usize> = Vec::with_capacity(points.len());

    while !remaining.is_empty() {
        let mut best: Option<(usize, usize)> = None;
        let mut best_cost = f64::INFINITY;

        for (pos, &idx) in remaining.iter().enumerate() {
            let candidate = points[idx];
            for insert_at in 0..=tour.len() {
                let prev = if insert_at == 0 {
                    start
                } else {
                    points[tour[insert_at - 1]]
                };
                let next = if insert_at == tour.len() {
                    end
                } else {
                    points[tour[insert_at]]
                };
                let detour = metric.distance_m(prev, candidate)
                    + metric.distance_m(candidate, next)
                    - metric.distance_m(prev, next);
                if detour < best_cost {
                    best_cost = detour;
                    best = Some((pos, insert_at));
                }
            }
        }

        match best {
            Some((pos, insert_at)) => {
                let idx = remaining.remove(pos);
                tour.insert(insert_at, idx);
            }
            None => {
                // No comparable detour cost at all. Append so the loop
                // still terminates after |free| insertions.
                let idx = remaining.remove(0);
                tour.push(idx);
            }
        }
    }
    tour
}
