//! Data model for annotated route geometry.
//!
//! A routing response arrives as a polyline plus sparse interval-encoded
//! attributes. The types here mirror that wire shape on the way in
//! (`DetailInterval`, `InstructionEntry`) and the dense decoded form the
//! rest of the pipeline works with (`AnnotatedPolyline` and its tracks).
//! Everything is created fresh per routing response and discarded on the
//! next request; nothing here mutates across requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A position in lon/lat degrees.
///
/// Engines and frontends hand coordinates around both as `[lon, lat]`
/// arrays and as records; the `From` impls are the normalization point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lon: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lon, lat): (f64, f64)) -> Self {
        Self { lon, lat }
    }
}

impl From<[f64; 2]> for Point {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

/// A polyline vertex as produced by the routing engine.
///
/// `distance_m` is the cumulative distance from the route start. Vertices
/// are read-only inputs to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lon: f64,
    pub lat: f64,
    pub elevation: Option<f64>,
    pub distance_m: f64,
}

impl Vertex {
    pub fn point(&self) -> Point {
        Point::new(self.lon, self.lat)
    }
}

/// A scalar attribute value attached to a vertex.
///
/// The engine encodes these as plain JSON scalars, hence the untagged
/// representation. Absent values are `None` at the track level, not a
/// variant here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl TrackValue {
    /// Stringified form used as a statistics bucket key.
    ///
    /// Booleans normalize to `"true"`/`"false"`; everything else is
    /// stringified as-is.
    pub fn value_key(&self) -> String {
        match self {
            TrackValue::Bool(true) => "true".to_string(),
            TrackValue::Bool(false) => "false".to_string(),
            TrackValue::Number(n) => n.to_string(),
            TrackValue::Text(s) => s.clone(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            TrackValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A dense per-vertex attribute array, index-aligned with the vertices.
pub type Track = Vec<Option<TrackValue>>;

/// Sparse run encoding from the engine's `details` mapping: a closed
/// `[start, end]` range of vertex indices sharing one value, sent on the
/// wire as a `[start, end, value]` triple.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "(i64, i64, TrackValue)")]
pub struct DetailInterval {
    pub start: i64,
    pub end: i64,
    pub value: TrackValue,
}

impl DetailInterval {
    pub fn new(start: i64, end: i64, value: TrackValue) -> Self {
        Self { start, end, value }
    }
}

impl From<(i64, i64, TrackValue)> for DetailInterval {
    fn from((start, end, value): (i64, i64, TrackValue)) -> Self {
        Self { start, end, value }
    }
}

/// One turn instruction from the engine, carrying its own vertex interval
/// plus the per-instruction attributes that are denser than the detail
/// encoding for the same keys.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstructionEntry {
    pub interval: (i64, i64),
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub street_name: Option<String>,
    #[serde(default)]
    pub mapillary_coverage: Option<bool>,
    #[serde(default)]
    pub osm_way_id: Option<i64>,
}

/// An ordered polyline plus its decoded attribute tracks.
///
/// Invariant: every track has exactly as many entries as there are
/// vertices. `insert_track` enforces this by padding with `None` or
/// truncating, with a warning, rather than failing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedPolyline {
    vertices: Vec<Vertex>,
    tracks: HashMap<String, Track>,
}

impl AnnotatedPolyline {
    pub fn new(vertices: Vec<Vertex>) -> Self {
        Self {
            vertices,
            tracks: HashMap::new(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().map(Vertex::point).collect()
    }

    pub fn track(&self, key: &str) -> Option<&Track> {
        self.tracks.get(key)
    }

    pub fn track_keys(&self) -> impl Iterator<Item = &str> {
        self.tracks.keys().map(String::as_str)
    }

    /// Attaches a decoded track, normalizing its length to the vertex count.
    pub fn insert_track(&mut self, key: impl Into<String>, mut track: Track) {
        let key = key.into();
        let n = self.vertices.len();
        if track.len() != n {
            tracing::warn!(
                key = %key,
                expected = n,
                actual = track.len(),
                "track length mismatch, padding/truncating to vertex count"
            );
            track.resize(n, None);
        }
        self.tracks.insert(key, track);
    }
}
