//! Waypoint set: fixed anchors, reorderable free waypoints, and the
//! resequencing lock.
//!
//! Waypoints get a stable id at insertion time so payload (labels) follows
//! a waypoint through reordering even when two waypoints share exact
//! coordinates. The `locked` flag suppresses automatic resequencing after a
//! manual reorder or delete; adding a waypoint (or emptying the set) clears
//! it.

use serde::{Deserialize, Serialize};

use crate::track::Point;

/// Stable identifier assigned when a waypoint is added to a set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WaypointId(u64);

/// A free waypoint with its opaque display payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: WaypointId,
    pub point: Point,
    pub label: Option<String>,
}

/// The planning request state between route requests: start/end anchors
/// plus the free waypoints to visit in between.
///
/// The sequencer only reads a set and returns a new ordering; all mutation
/// happens here, driven by the owning application.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaypointSet {
    start: Option<Point>,
    end: Option<Point>,
    free: Vec<Waypoint>,
    locked: bool,
    next_id: u64,
}

impl WaypointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn free(&self) -> &[Waypoint] {
        &self.free
    }

    /// Whether automatic resequencing is currently suppressed.
    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn set_start(&mut self, point: impl Into<Point>) {
        self.start = Some(point.into());
    }

    pub fn set_end(&mut self, point: impl Into<Point>) {
        self.end = Some(point.into());
    }

    /// Adds a free waypoint and re-enables automatic resequencing.
    pub fn push_free(&mut self, point: impl Into<Point>, label: Option<String>) -> WaypointId {
        let id = WaypointId(self.next_id);
        self.next_id += 1;
        self.free.push(Waypoint {
            id,
            point: point.into(),
            label,
        });
        self.locked = false;
        id
    }

    /// Removes a waypoint by id. A manual delete locks the remaining order;
    /// an emptied set unlocks.
    pub fn remove_free(&mut self, id: WaypointId) -> Option<Waypoint> {
        let position = self.free.iter().position(|w| w.id == id)?;
        let removed = self.free.remove(position);
        self.locked = !self.free.is_empty();
        Some(removed)
    }

    /// Moves the waypoint at `from` to position `to` and locks the order.
    /// Out-of-range indices are a no-op.
    pub fn reorder_free(&mut self, from: usize, to: usize) -> bool {
        if from >= self.free.len() || to >= self.free.len() {
            return false;
        }
        let waypoint = self.free.remove(from);
        self.free.insert(to, waypoint);
        self.locked = true;
        true
    }

    /// Replaces the free ordering with a sequencer result. Automatic
    /// resequencing output, so the lock state is left untouched.
    pub fn apply_order(&mut self, order: Vec<Waypoint>) {
        debug_assert_eq!(order.len(), self.free.len());
        self.free = order;
    }

    /// The full point list for a route request: `[start, ...free, end]`.
    /// `None` until both anchors are placed.
    pub fn route_points(&self) -> Option<Vec<Point>> {
        let start = self.start?;
        let end = self.end?;
        let mut points = Vec::with_capacity(self.free.len() + 2);
        points.push(start);
        points.extend(self.free.iter().map(|w| w.point));
        points.push(end);
        Some(points)
    }
}
