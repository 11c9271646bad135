use serde::Serialize;

use crate::database::models::{AttendanceRecord, AttendanceStatus};
use crate::services::schedule::ResolvedSchedule;

/// Display-layer annotation comparing recorded times against the resolved
/// window. Staying past the scheduled end is deliberately not flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingLabel {
    EarlyCheckIn,
    Late,
    EarlyCheckOut,
}

/// Pure classification; never touches stored data. A missing boundary on
/// either side simply skips that comparison, and absences are never
/// judged on timing.
///
/// Windows that wrap midnight (night shifts) are anchored to the start
/// day: the shift covers [start, midnight) plus [midnight, end) of the
/// next day. A check-in after midnight is late, not early; the daytime
/// gap before the shift counts as early for check-ins and as past-end
/// for check-outs.
pub fn classify(record: &AttendanceRecord, schedule: &ResolvedSchedule) -> Vec<TimingLabel> {
    let mut labels = Vec::new();

    if record.status == AttendanceStatus::Absent {
        return labels;
    }

    let wraps = schedule.wraps_midnight();

    if let (Some(start), Some(in_time)) = (schedule.start_time, record.in_time) {
        if wraps {
            if let Some(end) = schedule.end_time {
                if in_time > start || in_time < end {
                    labels.push(TimingLabel::Late);
                } else if in_time < start && in_time >= end {
                    labels.push(TimingLabel::EarlyCheckIn);
                }
            }
        } else if in_time < start {
            labels.push(TimingLabel::EarlyCheckIn);
        } else if in_time > start {
            labels.push(TimingLabel::Late);
        }
    }

    if let (Some(end), Some(out_time)) = (schedule.end_time, record.out_time) {
        if wraps {
            if let Some(start) = schedule.start_time {
                if out_time >= start || out_time < end {
                    labels.push(TimingLabel::EarlyCheckOut);
                }
            }
        } else if out_time < end {
            labels.push(TimingLabel::EarlyCheckOut);
        }
    }

    labels
}
