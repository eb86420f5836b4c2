//! Test fixtures for route-annotator.
//!
//! Builders for vertices, tracks, and raw engine-response payloads shared
//! by the integration suites.
#![allow(dead_code)]

use route_annotator::track::{Point, Track, TrackValue, Vertex};

pub fn text(s: &str) -> Option<TrackValue> {
    Some(TrackValue::Text(s.to_string()))
}

pub fn number(n: f64) -> Option<TrackValue> {
    Some(TrackValue::Number(n))
}

pub fn boolean(b: bool) -> Option<TrackValue> {
    Some(TrackValue::Bool(b))
}

/// Builds a track from string labels, with `None` standing for null.
pub fn text_track(labels: &[Option<&str>]) -> Track {
    labels
        .iter()
        .map(|label| label.map(|s| TrackValue::Text(s.to_string())))
        .collect()
}

/// Equally spaced vertices along the 52°N parallel, starting at `lon0`.
pub fn vertices_along_parallel(lon0: f64, step: f64, count: usize) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(count);
    let mut cumulative = 0.0;
    for i in 0..count {
        let lon = lon0 + step * i as f64;
        if i > 0 {
            let prev = Point::new(lon - step, 52.0);
            cumulative += route_annotator::haversine::haversine_m(prev, Point::new(lon, 52.0));
        }
        vertices.push(Vertex {
            lon,
            lat: 52.0,
            elevation: None,
            distance_m: cumulative,
        });
    }
    vertices
}

pub fn points_of(vertices: &[Vertex]) -> Vec<Point> {
    vertices.iter().map(Vertex::point).collect()
}
