//! Mission file loading and validation.
//!
//! A mission document is a JSON object with one `primary_mission` (bare
//! x/y/z coordinates plus an HHMM start/end window) and zero or more
//! `simulated_missions` whose waypoints already carry HHMM timestamps. The
//! primary drone's timestamps are derived here via the constant-speed timing
//! model; simulated waypoints are converted and sorted by time before they
//! reach the core.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use deconflict_core::{
    hhmm_to_minutes, timestamp_mission, DroneMission, PathPoint, TimingError, Waypoint,
};

/// Failures while loading or validating a mission document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read mission file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in mission file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("drone {drone_id}: {source}")]
    Timing {
        drone_id: String,
        #[source]
        source: TimingError,
    },
}

#[derive(Debug, Deserialize)]
struct MissionFile {
    primary_mission: RawPrimaryMission,
    #[serde(default)]
    simulated_missions: Vec<RawSimulatedMission>,
}

#[derive(Debug, Deserialize)]
struct RawPrimaryMission {
    drone_id: String,
    waypoints: Vec<RawPlannedPoint>,
    start_time: i64,
    end_time: i64,
}

/// Primary waypoints carry coordinates only; a stray `timestamp` field means
/// the document confused primary and simulated formats, so reject it.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlannedPoint {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Deserialize)]
struct RawSimulatedMission {
    drone_id: String,
    waypoints: Vec<RawTimedPoint>,
}

#[derive(Debug, Deserialize)]
struct RawTimedPoint {
    x: f64,
    y: f64,
    z: f64,
    timestamp: i64,
}

/// Load the primary and simulated missions from a JSON file on disk.
pub fn load_missions(path: &Path) -> Result<(DroneMission, Vec<DroneMission>), LoadError> {
    let raw = fs::read_to_string(path)?;
    parse_missions(&raw)
}

/// Parse a mission document from JSON text.
pub fn parse_missions(raw: &str) -> Result<(DroneMission, Vec<DroneMission>), LoadError> {
    let file: MissionFile = serde_json::from_str(raw)?;
    let primary = build_primary(file.primary_mission)?;

    let mut simulated = Vec::with_capacity(file.simulated_missions.len());
    for sim in file.simulated_missions {
        simulated.push(build_simulated(sim)?);
    }

    Ok((primary, simulated))
}

fn build_primary(raw: RawPrimaryMission) -> Result<DroneMission, LoadError> {
    let timing = |source| LoadError::Timing {
        drone_id: raw.drone_id.clone(),
        source,
    };

    let start = hhmm_to_minutes(raw.start_time).map_err(timing)?;
    let end = hhmm_to_minutes(raw.end_time).map_err(timing)?;

    let points: Vec<PathPoint> = raw
        .waypoints
        .iter()
        .map(|p| PathPoint::new(p.x, p.y, p.z))
        .collect();

    timestamp_mission(raw.drone_id.clone(), &points, start, end).map_err(timing)
}

fn build_simulated(raw: RawSimulatedMission) -> Result<DroneMission, LoadError> {
    let mut waypoints = Vec::with_capacity(raw.waypoints.len());
    for point in &raw.waypoints {
        let minutes = hhmm_to_minutes(point.timestamp).map_err(|source| LoadError::Timing {
            drone_id: raw.drone_id.clone(),
            source,
        })?;
        waypoints.push(Waypoint::new(point.x, point.y, point.z, minutes));
    }

    // Files may list simulated waypoints out of order.
    waypoints.sort_by_key(|wp| wp.timestamp_minutes);

    Ok(DroneMission::new(raw.drone_id, waypoints))
}
