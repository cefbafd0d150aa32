//! Spatio-temporal conflict detection between a primary mission and a fleet
//! of simulated missions.
//!
//! Two independent predicates feed the report: segment pairs that breach the
//! safety buffer while their time windows overlap, and waypoint pairs that
//! coincide exactly in space and time. Every check is a pure function of its
//! inputs; nothing is retained between runs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{DroneMission, Segment, Waypoint};
use crate::rules::SafetyConfig;
use crate::spatial::{self, FLOAT_TOLERANCE};

/// Clearance verdict for one deconfliction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearanceStatus {
    Clear,
    ConflictDetected,
}

impl fmt::Display for ClearanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClearanceStatus::Clear => write!(f, "Clear"),
            ClearanceStatus::ConflictDetected => write!(f, "Conflict Detected"),
        }
    }
}

/// Category of a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Two path segments breach the buffer while their windows overlap.
    SegmentConflict,
    /// Two waypoints coincide in space and time.
    WaypointCollision,
}

/// One detected conflict between the primary mission and a simulated mission.
///
/// Indices refer to segments for [`ConflictKind::SegmentConflict`] and to
/// waypoints for [`ConflictKind::WaypointCollision`]. Records are immutable
/// once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub kind: ConflictKind,
    pub primary_index: usize,
    pub other_drone_id: String,
    pub other_index: usize,
    pub primary_time_window: (u32, u32),
    /// Absent for waypoint collisions, where both drones share the same
    /// instant.
    pub other_time_window: Option<(u32, u32)>,
}

/// Aggregated result of checking one primary mission against a fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub status: ClearanceStatus,
    pub records: Vec<ConflictRecord>,
}

impl ConflictReport {
    pub fn is_clear(&self) -> bool {
        self.status == ClearanceStatus::Clear
    }
}

/// True iff the closed intervals `[s1, e1]` and `[s2, e2]` intersect.
/// Single-instant intervals (`s == e`) are valid.
pub fn intervals_overlap(s1: u32, e1: u32, s2: u32, e2: u32) -> bool {
    s1 <= e2 && s2 <= e1
}

/// Spatio-temporal conflict between two path segments: proximity breach
/// while the segments' time windows overlap. The spatial check runs first;
/// it is the more discriminating of the two and fails fast for most pairs.
pub fn segments_conflict(a: Segment<'_>, b: Segment<'_>, safety_buffer: f64) -> bool {
    if !spatial::segments_within_buffer(
        a.start.coords(),
        a.end.coords(),
        b.start.coords(),
        b.end.coords(),
        safety_buffer,
    ) {
        return false;
    }

    let (s1, e1) = a.time_window();
    let (s2, e2) = b.time_window();
    intervals_overlap(s1, e1, s2, e2)
}

/// Whether two waypoints put their drones in the same place at the same
/// time. Timestamps must match exactly; coordinates match within tolerance.
pub fn waypoints_collide(a: &Waypoint, b: &Waypoint) -> bool {
    if a.timestamp_minutes != b.timestamp_minutes {
        return false;
    }

    (a.x - b.x).abs() < FLOAT_TOLERANCE
        && (a.y - b.y).abs() < FLOAT_TOLERANCE
        && (a.z - b.z).abs() < FLOAT_TOLERANCE
}

/// Check the primary mission against every simulated mission.
///
/// Enumerates every (primary segment, simulated segment) pair and every
/// (primary waypoint, simulated waypoint) pair; each positive evaluation
/// appends one record. All conflicts are reported, never just the first, and
/// record order is deterministic: simulated mission order, then primary
/// index, then the other mission's index.
pub fn find_conflicts(
    primary: &DroneMission,
    simulated: &[DroneMission],
    rules: &SafetyConfig,
) -> ConflictReport {
    let mut records = Vec::new();
    let primary_segments = primary.path_segments();

    for sim in simulated {
        let sim_segments = sim.path_segments();

        for (p_idx, p_seg) in primary_segments.iter().enumerate() {
            for (s_idx, s_seg) in sim_segments.iter().enumerate() {
                if segments_conflict(*p_seg, *s_seg, rules.safety_buffer) {
                    records.push(ConflictRecord {
                        kind: ConflictKind::SegmentConflict,
                        primary_index: p_idx,
                        other_drone_id: sim.drone_id.clone(),
                        other_index: s_idx,
                        primary_time_window: p_seg.time_window(),
                        other_time_window: Some(s_seg.time_window()),
                    });
                }
            }
        }

        for (p_idx, p_wp) in primary.waypoints.iter().enumerate() {
            for (s_idx, s_wp) in sim.waypoints.iter().enumerate() {
                if waypoints_collide(p_wp, s_wp) {
                    let instant = p_wp.timestamp_minutes;
                    records.push(ConflictRecord {
                        kind: ConflictKind::WaypointCollision,
                        primary_index: p_idx,
                        other_drone_id: sim.drone_id.clone(),
                        other_index: s_idx,
                        primary_time_window: (instant, instant),
                        other_time_window: None,
                    });
                }
            }
        }
    }

    let status = if records.is_empty() {
        ClearanceStatus::Clear
    } else {
        ClearanceStatus::ConflictDetected
    };

    ConflictReport { status, records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;

    fn mission(drone_id: &str, waypoints: &[(f64, f64, f64, u32)]) -> DroneMission {
        let waypoints = waypoints
            .iter()
            .map(|&(x, y, z, t)| Waypoint::new(x, y, z, t))
            .collect();
        DroneMission::new(drone_id, waypoints)
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (480, 490, 483, 486),
            (480, 490, 491, 494),
            (0, 0, 0, 0),
            (100, 200, 200, 300),
            (5, 5, 4, 6),
        ];
        for (s1, e1, s2, e2) in cases {
            assert_eq!(
                intervals_overlap(s1, e1, s2, e2),
                intervals_overlap(s2, e2, s1, e1),
                "asymmetric overlap for [{s1},{e1}] vs [{s2},{e2}]"
            );
        }
    }

    #[test]
    fn touching_and_instant_intervals_overlap() {
        assert!(intervals_overlap(480, 490, 490, 500));
        assert!(intervals_overlap(500, 500, 500, 500));
        assert!(intervals_overlap(500, 500, 490, 510));
        assert!(!intervals_overlap(480, 490, 491, 494));
    }

    #[test]
    fn crossing_paths_with_overlapping_windows_conflict() {
        let primary = mission("PRIMARY", &[(0.0, 0.0, 0.0, 480), (100.0, 0.0, 0.0, 490)]);
        let sim = mission("SIM-A", &[(50.0, -10.0, 0.0, 483), (50.0, 10.0, 0.0, 486)]);

        let report = find_conflicts(&primary, &[sim], &SafetyConfig::new(5.0));
        assert_eq!(report.status, ClearanceStatus::ConflictDetected);
        assert_eq!(report.records.len(), 1);

        let record = &report.records[0];
        assert_eq!(record.kind, ConflictKind::SegmentConflict);
        assert_eq!(record.primary_index, 0);
        assert_eq!(record.other_drone_id, "SIM-A");
        assert_eq!(record.other_index, 0);
        assert_eq!(record.primary_time_window, (480, 490));
        assert_eq!(record.other_time_window, Some((483, 486)));
    }

    #[test]
    fn crossing_paths_with_disjoint_windows_are_clear() {
        // Same geometry as above but the simulated drone arrives after the
        // primary has finished.
        let primary = mission("PRIMARY", &[(0.0, 0.0, 0.0, 480), (100.0, 0.0, 0.0, 490)]);
        let sim = mission("SIM-A", &[(50.0, -10.0, 0.0, 491), (50.0, 10.0, 0.0, 494)]);

        let report = find_conflicts(&primary, &[sim], &SafetyConfig::new(5.0));
        assert_eq!(report.status, ClearanceStatus::Clear);
        assert!(report.records.is_empty());
    }

    #[test]
    fn identical_waypoint_at_same_minute_collides() {
        let primary = mission("PRIMARY", &[(10.0, 10.0, 5.0, 500)]);
        let sim = mission("SIM-A", &[(10.0, 10.0, 5.0, 500)]);

        let report = find_conflicts(&primary, &[sim], &SafetyConfig::new(5.0));
        assert_eq!(report.records.len(), 1);

        let record = &report.records[0];
        assert_eq!(record.kind, ConflictKind::WaypointCollision);
        assert_eq!(record.primary_time_window, (500, 500));
        assert_eq!(record.other_time_window, None);
    }

    #[test]
    fn perturbed_coordinate_or_time_is_not_a_collision() {
        let a = Waypoint::new(10.0, 10.0, 5.0, 500);

        assert!(!waypoints_collide(&a, &Waypoint::new(10.000001, 10.0, 5.0, 500)));
        assert!(!waypoints_collide(&a, &Waypoint::new(10.0, 10.000001, 5.0, 500)));
        assert!(!waypoints_collide(&a, &Waypoint::new(10.0, 10.0, 5.000001, 500)));
        assert!(!waypoints_collide(&a, &Waypoint::new(10.0, 10.0, 5.0, 501)));
        assert!(waypoints_collide(&a, &Waypoint::new(10.0, 10.0, 5.0, 500)));
    }

    #[test]
    fn every_conflicting_pair_is_reported() {
        // The simulated drone shadows both primary legs one unit to the
        // side; every segment pair breaches the buffer within its window.
        let primary = mission(
            "PRIMARY",
            &[(0.0, 0.0, 0.0, 480), (50.0, 0.0, 0.0, 485), (100.0, 0.0, 0.0, 490)],
        );
        let sim = mission(
            "SIM-A",
            &[(0.0, 1.0, 0.0, 480), (50.0, 1.0, 0.0, 485), (100.0, 1.0, 0.0, 490)],
        );

        let report = find_conflicts(&primary, &[sim], &SafetyConfig::new(5.0));
        let segment_records: Vec<_> = report
            .records
            .iter()
            .filter(|r| r.kind == ConflictKind::SegmentConflict)
            .collect();
        assert_eq!(segment_records.len(), 4);
    }

    #[test]
    fn records_follow_simulated_mission_order() {
        let primary = mission("PRIMARY", &[(0.0, 0.0, 0.0, 480), (100.0, 0.0, 0.0, 490)]);
        let sim_a = mission("SIM-A", &[(0.0, 1.0, 0.0, 480), (100.0, 1.0, 0.0, 490)]);
        let sim_b = mission("SIM-B", &[(0.0, 2.0, 0.0, 480), (100.0, 2.0, 0.0, 490)]);

        let report = find_conflicts(&primary, &[sim_a, sim_b], &SafetyConfig::new(5.0));
        let ids: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.other_drone_id.as_str())
            .collect();
        assert_eq!(ids, vec!["SIM-A", "SIM-B"]);
    }

    #[test]
    fn repeated_runs_produce_identical_reports() {
        let primary = mission(
            "PRIMARY",
            &[(0.0, 0.0, 0.0, 480), (50.0, 0.0, 0.0, 485), (100.0, 0.0, 0.0, 490)],
        );
        let sims = vec![
            mission("SIM-A", &[(50.0, -10.0, 0.0, 483), (50.0, 10.0, 0.0, 486)]),
            mission("SIM-B", &[(0.0, 0.0, 0.0, 480), (0.0, 30.0, 0.0, 488)]),
        ];
        let rules = SafetyConfig::new(5.0);

        let first = find_conflicts(&primary, &sims, &rules);
        let second = find_conflicts(&primary, &sims, &rules);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_fleet_is_always_clear() {
        let primary = mission("PRIMARY", &[(0.0, 0.0, 0.0, 480), (100.0, 0.0, 0.0, 490)]);
        let report = find_conflicts(&primary, &[], &SafetyConfig::default());
        assert!(report.is_clear());
    }
}
