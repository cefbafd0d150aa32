//! Core data models for mission deconfliction.

use serde::{Deserialize, Serialize};

/// A single point in space and time on a drone's flight path.
///
/// Timestamps are minutes since midnight; any value derived from clock input
/// stays within 0-1439. Within one mission waypoints are ordered
/// non-decreasing by `timestamp_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub timestamp_minutes: u32,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64, timestamp_minutes: u32) -> Self {
        Self {
            x,
            y,
            z,
            timestamp_minutes,
        }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A raw planned 3D coordinate before any timestamp has been assigned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PathPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// The complete time-stamped flight plan for a single drone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneMission {
    pub drone_id: String,
    pub waypoints: Vec<Waypoint>,
}

impl DroneMission {
    pub fn new(drone_id: impl Into<String>, waypoints: Vec<Waypoint>) -> Self {
        Self {
            drone_id: drone_id.into(),
            waypoints,
        }
    }

    /// Consecutive waypoint pairs in flight order.
    ///
    /// A mission with fewer than two waypoints has no path segments.
    pub fn path_segments(&self) -> Vec<Segment<'_>> {
        self.waypoints
            .windows(2)
            .map(|pair| Segment {
                start: &pair[0],
                end: &pair[1],
            })
            .collect()
    }
}

/// The straight-line leg between two chronologically adjacent waypoints of
/// one mission. Non-owning; pairs are taken in mission order.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a> {
    pub start: &'a Waypoint,
    pub end: &'a Waypoint,
}

impl Segment<'_> {
    /// Closed minute interval covered by this segment, tolerating reversed
    /// endpoint timestamps.
    pub fn time_window(&self) -> (u32, u32) {
        let a = self.start.timestamp_minutes;
        let b = self.end.timestamp_minutes;
        (a.min(b), a.max(b))
    }
}
