//! Run partitioner: constant-value runs over an attribute track.
//!
//! Two views of the same `(track, vertices)` pair, with deliberately
//! different boundary conventions:
//!
//! - the render partition shares each run boundary vertex with the next
//!   segment so drawn segments touch with no gap, which means segment
//!   point counts sum to `N + (segments - 1)`;
//! - the stats partition assigns each edge `i -> i+1` to the value at
//!   vertex `i`, so edge lengths partition the polyline exactly (no
//!   double-count, no gap).

use std::collections::HashMap;

use crate::haversine::haversine_m;
use crate::palette::{Color, DEFAULT_COLOR, TrackPalette};
use crate::track::{Point, Track, TrackValue, Vertex};

/// A maximal run of vertices sharing one attribute value, prepared for
/// rendering. `start..end` is the owned vertex range; `points` additionally
/// carries the first vertex of the next run as a shared boundary point.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSegment {
    pub start: usize,
    pub end: usize,
    pub value: Option<TrackValue>,
    pub points: Vec<Point>,
}

/// One row of the statistics panel output.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceBucket {
    pub label: String,
    pub total_m: f64,
    pub color: Color,
}

/// Splits a track into renderable constant-value segments.
///
/// Null and absent values form one equivalence class. A trailing run that
/// collapses to a single point is merged into its predecessor instead of
/// being emitted as a degenerate zero-length segment. Fewer than two
/// points yield no segments.
pub fn partition_for_render(track: &Track, points: &[Point]) -> Vec<RenderSegment> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut run_start = 0;

    for i in 1..n {
        if value_at(track, i) != value_at(track, run_start) {
            segments.push(RenderSegment {
                start: run_start,
                end: i,
                value: value_at(track, run_start).cloned(),
                // Includes points[i], the first vertex of the next run.
                points: points[run_start..=i].to_vec(),
            });
            run_start = i;
        }
    }

    if run_start == n - 1 {
        if let Some(last) = segments.last_mut() {
            // Single trailing point: its coordinate is already the previous
            // segment's shared boundary, so fold it in.
            last.end = n;
            return segments;
        }
    }

    segments.push(RenderSegment {
        start: run_start,
        end: n,
        value: value_at(track, run_start).cloned(),
        points: points[run_start..n].to_vec(),
    });
    segments
}

/// Accumulates haversine edge lengths into buckets keyed by the stringified
/// value at each edge's start vertex.
///
/// Edges whose start vertex has no value are skipped. With no nulls the
/// bucket totals sum to the polyline's haversine length.
pub fn partition_for_stats(track: &Track, vertices: &[Vertex]) -> HashMap<String, f64> {
    let mut buckets: HashMap<String, f64> = HashMap::new();
    if vertices.len() < 2 {
        return buckets;
    }

    for i in 0..vertices.len() - 1 {
        let Some(value) = value_at(track, i) else {
            continue;
        };
        let edge_m = haversine_m(vertices[i].point(), vertices[i + 1].point());
        *buckets.entry(value.value_key()).or_insert(0.0) += edge_m;
    }
    buckets
}

/// Statistics-panel rows for one attribute: per-value distance totals with
/// colors, sorted descending by distance (label as tie-break).
pub fn distance_breakdown(key: &str, track: &Track, vertices: &[Vertex]) -> Vec<DistanceBucket> {
    let totals = partition_for_stats(track, vertices);
    let colors = bucket_colors(key, track);

    let mut rows: Vec<DistanceBucket> = totals
        .into_iter()
        .map(|(label, total_m)| {
            let color = colors.get(&label).copied().unwrap_or(DEFAULT_COLOR);
            DistanceBucket { label, total_m, color }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.total_m
            .partial_cmp(&a.total_m)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    rows
}

/// Colors for an ordered render partition, one per segment. First-seen
/// order follows the segment order, so assignment is stable for a given
/// partition.
pub fn segment_colors(key: &str, segments: &[RenderSegment]) -> Vec<Color> {
    let sample: Vec<Option<TrackValue>> =
        segments.iter().map(|segment| segment.value.clone()).collect();
    let mut palette = TrackPalette::new(key, &sample);
    segments
        .iter()
        .map(|segment| palette.color_for(segment.value.as_ref()))
        .collect()
}

/// Bucket-key to color mapping, assigned in track order so first-seen
/// fallback colors are deterministic.
fn bucket_colors(key: &str, track: &Track) -> HashMap<String, Color> {
    let mut palette = TrackPalette::new(key, track);
    let mut colors: HashMap<String, Color> = HashMap::new();
    for value in track.iter().flatten() {
        let bucket_key = value.value_key();
        if !colors.contains_key(&bucket_key) {
            let color = palette.color_for(Some(value));
            colors.insert(bucket_key, color);
        }
    }
    colors
}

fn value_at(track: &Track, index: usize) -> Option<&TrackValue> {
    track.get(index).and_then(Option::as_ref)
}
