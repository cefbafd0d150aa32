pub mod conflict;
pub mod models;
pub mod rules;
pub mod spatial;
pub mod timing;

pub use conflict::{
    find_conflicts, intervals_overlap, ClearanceStatus, ConflictKind, ConflictRecord,
    ConflictReport,
};
pub use models::{DroneMission, PathPoint, Segment, Waypoint};
pub use rules::SafetyConfig;
pub use spatial::FLOAT_TOLERANCE;
pub use timing::{hhmm_to_minutes, timestamp_mission, TimingError};
