//! Interval decoder: sparse engine annotations to dense per-vertex tracks.
//!
//! The engine sends attribute runs as closed `[start, end, value]` index
//! triples, plus per-instruction intervals that carry a denser encoding for
//! a handful of keys. Decoding is fail-soft: unusable intervals are skipped
//! with a warning and never abort the response.

use std::collections::HashMap;

use crate::track::{AnnotatedPolyline, DetailInterval, InstructionEntry, Track, TrackValue, Vertex};

pub const KEY_TIME: &str = "time";
pub const KEY_DISTANCE: &str = "distance";
pub const KEY_STREET_NAME: &str = "street_name";
pub const KEY_MAPILLARY_COVERAGE: &str = "mapillary_coverage";
pub const KEY_OSM_WAY_ID: &str = "osm_way_id";

/// How instruction-sourced `mapillary_coverage` merges over the
/// detail-sourced track of the same key.
///
/// `ReplaceIfAnyPresent` is the historically observed behavior: the
/// instruction track wins wholesale as soon as it has a single non-null
/// entry, even where it is null at vertices the detail track covers.
/// `BackfillNulls` merges per vertex like `osm_way_id` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageMerge {
    ReplaceIfAnyPresent,
    BackfillNulls,
}

#[derive(Debug, Clone)]
pub struct DecodeOptions {
    pub coverage_merge: CoverageMerge,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            coverage_merge: CoverageMerge::ReplaceIfAnyPresent,
        }
    }
}

/// Expands detail intervals and instruction intervals into dense tracks of
/// length exactly `vertex_count`, applying the per-key merge policy.
///
/// Merge policy:
/// - `time`, `distance`, `street_name`: instruction-sourced tracks replace
///   detail-sourced ones wholesale (instructions are denser for these).
/// - `osm_way_id`: instruction value wins per vertex; nulls are back-filled
///   from the detail track.
/// - `mapillary_coverage`: per `options.coverage_merge`.
pub fn decode_tracks(
    details: &HashMap<String, Vec<DetailInterval>>,
    instructions: &[InstructionEntry],
    vertex_count: usize,
    options: &DecodeOptions,
) -> HashMap<String, Track> {
    let mut tracks: HashMap<String, Track> = HashMap::new();

    for (key, intervals) in details {
        let mut track = vec![None; vertex_count];
        for interval in intervals {
            write_run(&mut track, interval.start, interval.end, &interval.value);
        }
        tracks.insert(key.clone(), track);
    }

    if instructions.is_empty() {
        return tracks;
    }

    let mut time: Track = vec![None; vertex_count];
    let mut distance: Track = vec![None; vertex_count];
    let mut street_name: Track = vec![None; vertex_count];
    let mut coverage: Track = vec![None; vertex_count];
    let mut way_id: Track = vec![None; vertex_count];

    for entry in instructions {
        let (start, end) = entry.interval;
        if let Some(value) = entry.time {
            write_run(&mut time, start, end, &TrackValue::Number(value));
        }
        if let Some(value) = entry.distance {
            write_run(&mut distance, start, end, &TrackValue::Number(value));
        }
        if let Some(name) = &entry.street_name {
            write_run(&mut street_name, start, end, &TrackValue::Text(name.clone()));
        }
        if let Some(covered) = entry.mapillary_coverage {
            write_run(&mut coverage, start, end, &TrackValue::Bool(covered));
        }
        if let Some(id) = entry.osm_way_id {
            write_run(&mut way_id, start, end, &TrackValue::Number(id as f64));
        }
    }

    tracks.insert(KEY_TIME.to_string(), time);
    tracks.insert(KEY_DISTANCE.to_string(), distance);
    tracks.insert(KEY_STREET_NAME.to_string(), street_name);

    merge_backfill(&mut tracks, KEY_OSM_WAY_ID, way_id);

    match options.coverage_merge {
        CoverageMerge::ReplaceIfAnyPresent => {
            if has_values(&coverage) {
                tracks.insert(KEY_MAPILLARY_COVERAGE.to_string(), coverage);
            }
        }
        CoverageMerge::BackfillNulls => {
            merge_backfill(&mut tracks, KEY_MAPILLARY_COVERAGE, coverage);
        }
    }

    tracks
}

/// Decodes a full engine response into an annotated polyline, one fresh
/// instance per routing request.
pub fn annotate(
    vertices: Vec<Vertex>,
    details: &HashMap<String, Vec<DetailInterval>>,
    instructions: &[InstructionEntry],
    options: &DecodeOptions,
) -> AnnotatedPolyline {
    let mut line = AnnotatedPolyline::new(vertices);
    let tracks = decode_tracks(details, instructions, line.vertices().len(), options);
    for (key, track) in tracks {
        line.insert_track(key, track);
    }
    line
}

/// Writes `value` over the closed index range `[start, end]`, clipped to
/// the track bounds. Ranges that are empty after clipping (inverted or
/// entirely out of range) are skipped.
fn write_run(track: &mut Track, start: i64, end: i64, value: &TrackValue) {
    let n = track.len() as i64;
    if n == 0 {
        return;
    }
    let lo = start.max(0);
    let hi = end.min(n - 1);
    if hi < lo {
        tracing::warn!(start, end, vertex_count = n, "skipping unusable attribute interval");
        return;
    }
    for slot in &mut track[lo as usize..=hi as usize] {
        *slot = Some(value.clone());
    }
}

/// Instruction track wins per vertex; nulls fall back to the detail track.
/// An all-null merge result with no detail counterpart is not emitted.
fn merge_backfill(tracks: &mut HashMap<String, Track>, key: &str, mut merged: Track) {
    if let Some(detail) = tracks.get(key) {
        for (slot, fallback) in merged.iter_mut().zip(detail) {
            if slot.is_none() {
                *slot = fallback.clone();
            }
        }
        tracks.insert(key.to_string(), merged);
    } else if has_values(&merged) {
        tracks.insert(key.to_string(), merged);
    }
}

fn has_values(track: &Track) -> bool {
    track.iter().any(Option::is_some)
}
