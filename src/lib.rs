//! route-annotator core
//!
//! Pure computation behind a route planner: decoding sparse interval-encoded
//! route attributes into dense per-vertex tracks, partitioning an annotated
//! polyline into constant-value runs (for rendering and for distance
//! statistics), and sequencing free waypoints between fixed anchors with
//! TSP heuristics. No I/O, no shared state; the embedding app owns the
//! current route and waypoint set and passes them in.

pub mod traits;
pub mod track;
pub mod decoder;
pub mod partition;
pub mod palette;
pub mod haversine;
pub mod waypoints;
pub mod sequencer;
