use std::fmt;

use chrono::NaiveDate;

use crate::diff::OperationKind;
use crate::workout::WorkoutDocument;

/// Why a workout is being (re)created or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    /// No remote workout under this name
    New,
    /// Remote workout exists but nothing schedules it
    NotScheduled,
    /// Calendar entry was edited inside the recent-change window
    RecentlyChanged,
    /// Scheduled on a different date than the calendar entry
    Rescheduled { from: NaiveDate },
    /// Managed workout with no calendar entry left in the window
    Orphaned,
}

impl fmt::Display for ChangeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeReason::New => write!(f, "new"),
            ChangeReason::NotScheduled => write!(f, "not scheduled"),
            ChangeReason::RecentlyChanged => write!(f, "recently changed"),
            ChangeReason::Rescheduled { from } => write!(f, "moved from {from}"),
            ChangeReason::Orphaned => write!(f, "no longer in calendar"),
        }
    }
}

/// One remote call of a plan. Every operation is addressed by workout name;
/// ids of workouts created during the pass are only known once applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Delete {
        name: String,
        workout_id: i64,
        reason: ChangeReason,
    },
    Create {
        name: String,
        workout: WorkoutDocument,
        reason: ChangeReason,
    },
    Schedule {
        name: String,
        date: NaiveDate,
    },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Delete { .. } => OperationKind::Delete,
            Operation::Create { .. } => OperationKind::Create,
            Operation::Schedule { .. } => OperationKind::Schedule,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Operation::Delete { name, .. }
            | Operation::Create { name, .. }
            | Operation::Schedule { name, .. } => name,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Delete {
                name,
                workout_id,
                reason,
            } => write!(f, "{} {name} #{workout_id} ({reason})", self.kind()),
            Operation::Create { name, reason, .. } => write!(f, "{} {name} ({reason})", self.kind()),
            Operation::Schedule { name, date } => write!(f, "{} {name} on {date}", self.kind()),
        }
    }
}
