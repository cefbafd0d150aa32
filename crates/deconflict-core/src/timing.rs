//! Mission timing: clock conversion and constant-speed timestamp assignment.

use thiserror::Error;

use crate::models::{DroneMission, PathPoint, Waypoint};
use crate::spatial::{self, FLOAT_TOLERANCE};

/// Validation failures raised while timing a mission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// Clock value outside the HHMM envelope (hour 0-23, minute 0-59).
    #[error("invalid HHMM time {0}: must be 0-2359 with hour 0-23 and minute 0-59")]
    InvalidTime(i64),
    /// Mission start time not strictly before its end time.
    #[error("mission start ({start} min) must be strictly before end ({end} min)")]
    InvalidWindow { start: u32, end: u32 },
    /// A mission needs at least one waypoint.
    #[error("mission has no waypoints")]
    DegenerateInput,
}

/// Convert a clock time in HHMM integer form (e.g. 0830) to minutes since
/// midnight.
///
/// Values like 1460 sit inside `[0, 2359]` but decompose to an invalid
/// minute and are rejected.
pub fn hhmm_to_minutes(hhmm: i64) -> Result<u32, TimingError> {
    if !(0..=2359).contains(&hhmm) {
        return Err(TimingError::InvalidTime(hhmm));
    }

    let hour = hhmm / 100;
    let minute = hhmm % 100;
    if hour > 23 || minute > 59 {
        return Err(TimingError::InvalidTime(hhmm));
    }

    Ok((hour * 60 + minute) as u32)
}

/// Assign a timestamp to every waypoint of a planned mission.
///
/// Assumes the drone flies the polyline through `points` at constant ground
/// speed, departing at `start_minutes` and arriving at `end_minutes` (both
/// minutes since midnight). Each timestamp is rounded to the nearest minute
/// at assignment and clamped so accumulated float drift never pushes a
/// waypoint past the end of the window. If rounding leaves the final
/// waypoint within one minute of the window end it snaps exactly onto it;
/// larger drift is left as computed rather than renormalizing earlier
/// waypoints.
pub fn timestamp_mission(
    drone_id: impl Into<String>,
    points: &[PathPoint],
    start_minutes: u32,
    end_minutes: u32,
) -> Result<DroneMission, TimingError> {
    if points.is_empty() {
        return Err(TimingError::DegenerateInput);
    }
    if start_minutes >= end_minutes {
        return Err(TimingError::InvalidWindow {
            start: start_minutes,
            end: end_minutes,
        });
    }

    let drone_id = drone_id.into();

    if let [only] = points {
        let waypoint = Waypoint::new(only.x, only.y, only.z, start_minutes);
        return Ok(DroneMission::new(drone_id, vec![waypoint]));
    }

    let total_length: f64 = points
        .windows(2)
        .map(|pair| spatial::distance(pair[0].coords(), pair[1].coords()))
        .sum();

    // All coordinates identical: the drone never moves, so every waypoint
    // occurs at departure.
    if total_length == 0.0 {
        let waypoints = points
            .iter()
            .map(|p| Waypoint::new(p.x, p.y, p.z, start_minutes))
            .collect();
        return Ok(DroneMission::new(drone_id, waypoints));
    }

    let duration = f64::from(end_minutes - start_minutes);
    let speed = total_length / duration;

    let mut waypoints = Vec::with_capacity(points.len());
    let first = points[0];
    waypoints.push(Waypoint::new(first.x, first.y, first.z, start_minutes));

    let mut elapsed = f64::from(start_minutes);
    for (i, pair) in points.windows(2).enumerate() {
        let leg = spatial::distance(pair[0].coords(), pair[1].coords());
        let leg_minutes = if speed > FLOAT_TOLERANCE {
            leg / speed
        } else {
            // Vanishingly small speed despite a nonzero path; spread the
            // remaining window evenly over the remaining legs.
            let remaining_legs = (points.len() - 1 - i) as f64;
            let remaining = f64::from(end_minutes) - elapsed;
            if remaining > 0.0 {
                remaining / remaining_legs
            } else {
                0.0
            }
        };
        elapsed += leg_minutes;

        let stamped = (elapsed.round() as u32).min(end_minutes);
        let next = pair[1];
        waypoints.push(Waypoint::new(next.x, next.y, next.z, stamped));
    }

    // Snap the arrival waypoint onto the window end when rounding drift left
    // it within one minute.
    if let Some(last) = waypoints.last_mut() {
        if last.timestamp_minutes.abs_diff(end_minutes) <= 1 {
            last.timestamp_minutes = end_minutes;
        }
    }

    Ok(DroneMission::new(drone_id, waypoints))
}
