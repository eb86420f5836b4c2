//! Color and label assignment for attribute values.
//!
//! Known categorical keys use fixed lookup tables, continuous numeric keys
//! use a 4-bucket min/max-normalized gradient, and unknown categorical keys
//! get stable first-seen-order colors from a fallback palette. Null and
//! unmapped values share one default color. Attribute kinds are an explicit
//! enum so the dispatch is exhaustive instead of stringly-typed.

use std::collections::HashMap;

use crate::track::TrackValue;

pub type Color = &'static str;

/// Shared color for null and unmapped values.
pub const DEFAULT_COLOR: Color = "#969696";

const SURFACE_COLORS: &[(&str, Color)] = &[
    ("asphalt", "#2b83ba"),
    ("paved", "#64a1c4"),
    ("concrete", "#9cb8ce"),
    ("paving_stones", "#a6d96a"),
    ("cobblestone", "#b8a458"),
    ("sett", "#c9a227"),
    ("compacted", "#fdae61"),
    ("fine_gravel", "#f59053"),
    ("gravel", "#ec7145"),
    ("unpaved", "#d7191c"),
    ("ground", "#a6611a"),
    ("dirt", "#8c510a"),
    ("grass", "#5aae61"),
    ("sand", "#e8c07d"),
];

const ROAD_CLASS_COLORS: &[(&str, Color)] = &[
    ("motorway", "#e892a2"),
    ("trunk", "#f9b29c"),
    ("primary", "#fcd6a4"),
    ("secondary", "#f7fabf"),
    ("tertiary", "#ffffff"),
    ("residential", "#c8c8c8"),
    ("unclassified", "#dddddd"),
    ("service", "#bbbbbb"),
    ("track", "#996600"),
    ("cycleway", "#0060ff"),
    ("path", "#6e9e3c"),
    ("footway", "#fa8072"),
    ("steps", "#ff0000"),
];

const BICYCLE_INFRA_COLORS: &[(&str, Color)] = &[
    ("cycleway", "#0060ff"),
    ("lane", "#4d8cff"),
    ("shared_lane", "#99b9ff"),
    ("track", "#003cb8"),
    ("shared_path", "#7a5cff"),
    ("none", "#c8c8c8"),
];

const BOOLEAN_TRUE_COLOR: Color = "#05cb63";
const BOOLEAN_FALSE_COLOR: Color = "#e74c3c";

/// Low-to-high ramp for min/max-normalized numeric tracks.
const GRADIENT_RAMP: [Color; 4] = ["#2c7bb6", "#abd9e9", "#fdae61", "#d7191c"];

/// Stable fallback colors for categorical keys without a fixed table,
/// assigned in first-seen order.
const FALLBACK_PALETTE: &[Color] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
    "#e377c2", "#bcbd22", "#17becf", "#aec7e8", "#ffbb78", "#98df8a",
];

/// How values of one attribute key map to colors.
#[derive(Debug, Clone, Copy)]
pub enum AttributeKind {
    /// Fixed value-to-color table for a known categorical key.
    Categorical(&'static [(&'static str, Color)]),
    /// True/false pair (coverage flags and similar).
    Boolean,
    /// Continuous numeric key, colored by 4-bucket min/max normalization.
    Gradient,
    /// Unknown categorical key, colored from the fallback palette.
    Unknown,
}

pub fn kind_for(key: &str) -> AttributeKind {
    match key {
        "surface" => AttributeKind::Categorical(SURFACE_COLORS),
        "road_class" | "highway" => AttributeKind::Categorical(ROAD_CLASS_COLORS),
        "bicycle_infrastructure" | "cycleway" => AttributeKind::Categorical(BICYCLE_INFRA_COLORS),
        "mapillary_coverage" => AttributeKind::Boolean,
        "elevation" | "time" | "distance" => AttributeKind::Gradient,
        _ => AttributeKind::Unknown,
    }
}

/// Color assignment for one track.
///
/// Built from the attribute key and a sample of the track's values (the
/// sample fixes the gradient range). Assignment is deterministic given the
/// order values are first seen.
#[derive(Debug, Clone)]
pub struct TrackPalette {
    kind: AttributeKind,
    range: Option<(f64, f64)>,
    assigned: HashMap<String, Color>,
    cursor: usize,
}

impl TrackPalette {
    pub fn new(key: &str, sample: &[Option<TrackValue>]) -> Self {
        let kind = kind_for(key);
        let range = match kind {
            AttributeKind::Gradient => numeric_range(sample),
            _ => None,
        };
        Self {
            kind,
            range,
            assigned: HashMap::new(),
            cursor: 0,
        }
    }

    pub fn color_for(&mut self, value: Option<&TrackValue>) -> Color {
        let Some(value) = value else {
            return DEFAULT_COLOR;
        };
        match self.kind {
            AttributeKind::Categorical(table) => {
                let key = value.value_key();
                table
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, color)| *color)
                    .unwrap_or(DEFAULT_COLOR)
            }
            AttributeKind::Boolean => match value {
                TrackValue::Bool(true) => BOOLEAN_TRUE_COLOR,
                TrackValue::Bool(false) => BOOLEAN_FALSE_COLOR,
                _ => DEFAULT_COLOR,
            },
            AttributeKind::Gradient => match (value.as_number(), self.range) {
                (Some(n), Some((min, max))) => gradient_color(n, min, max),
                _ => DEFAULT_COLOR,
            },
            AttributeKind::Unknown => {
                let key = value.value_key();
                if let Some(&color) = self.assigned.get(&key) {
                    return color;
                }
                let color = FALLBACK_PALETTE[self.cursor % FALLBACK_PALETTE.len()];
                self.cursor += 1;
                self.assigned.insert(key, color);
                color
            }
        }
    }
}

fn numeric_range(sample: &[Option<TrackValue>]) -> Option<(f64, f64)> {
    let mut range: Option<(f64, f64)> = None;
    for value in sample.iter().flatten() {
        if let Some(n) = value.as_number() {
            range = Some(match range {
                Some((min, max)) => (min.min(n), max.max(n)),
                None => (n, n),
            });
        }
    }
    range
}

fn gradient_color(value: f64, min: f64, max: f64) -> Color {
    if max <= min {
        return GRADIENT_RAMP[0];
    }
    let bucket = ((value - min) / (max - min) * GRADIENT_RAMP.len() as f64) as usize;
    GRADIENT_RAMP[bucket.min(GRADIENT_RAMP.len() - 1)]
}
