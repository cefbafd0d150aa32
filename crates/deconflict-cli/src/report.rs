//! Human-readable rendering of conflict reports.

use deconflict_core::{ConflictKind, ConflictRecord, ConflictReport};

/// Render a single conflict record as a one-line description.
pub fn describe_record(record: &ConflictRecord) -> String {
    let (p_start, p_end) = record.primary_time_window;
    match record.kind {
        ConflictKind::SegmentConflict => {
            let (o_start, o_end) = record.other_time_window.unwrap_or((p_start, p_end));
            format!(
                "Spatio-Temporal Conflict: Primary Segment {} (Time {}-{}) vs \
                 Sim Drone {} Segment {} (Time {}-{}). \
                 Paths cross or breach buffer while time intervals overlap.",
                record.primary_index, p_start, p_end, record.other_drone_id, record.other_index,
                o_start, o_end,
            )
        }
        ConflictKind::WaypointCollision => format!(
            "Waypoint Collision: Primary Waypoint {} vs Sim Drone {} Waypoint {} at minute {}.",
            record.primary_index, record.other_drone_id, record.other_index, p_start,
        ),
    }
}

/// Render the full report, one line per record.
pub fn describe_report(report: &ConflictReport) -> Vec<String> {
    report.records.iter().map(describe_record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deconflict_core::ClearanceStatus;

    #[test]
    fn segment_conflict_line_names_both_windows() {
        let record = ConflictRecord {
            kind: ConflictKind::SegmentConflict,
            primary_index: 0,
            other_drone_id: "sim_A".to_string(),
            other_index: 2,
            primary_time_window: (480, 490),
            other_time_window: Some((483, 486)),
        };
        let line = describe_record(&record);
        assert!(line.starts_with("Spatio-Temporal Conflict"));
        assert!(line.contains("Primary Segment 0 (Time 480-490)"));
        assert!(line.contains("Sim Drone sim_A Segment 2 (Time 483-486)"));
    }

    #[test]
    fn waypoint_collision_line_names_the_minute() {
        let record = ConflictRecord {
            kind: ConflictKind::WaypointCollision,
            primary_index: 3,
            other_drone_id: "sim_B".to_string(),
            other_index: 1,
            primary_time_window: (500, 500),
            other_time_window: None,
        };
        let line = describe_record(&record);
        assert!(line.starts_with("Waypoint Collision"));
        assert!(line.contains("Sim Drone sim_B Waypoint 1 at minute 500."));
    }

    #[test]
    fn report_renders_one_line_per_record() {
        let report = ConflictReport {
            status: ClearanceStatus::ConflictDetected,
            records: vec![
                ConflictRecord {
                    kind: ConflictKind::SegmentConflict,
                    primary_index: 0,
                    other_drone_id: "sim_A".to_string(),
                    other_index: 0,
                    primary_time_window: (480, 490),
                    other_time_window: Some((483, 486)),
                },
                ConflictRecord {
                    kind: ConflictKind::WaypointCollision,
                    primary_index: 1,
                    other_drone_id: "sim_A".to_string(),
                    other_index: 0,
                    primary_time_window: (490, 490),
                    other_time_window: None,
                },
            ],
        };
        assert_eq!(describe_report(&report).len(), 2);
    }
}
