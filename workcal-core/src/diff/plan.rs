//! Compare the desired workouts against the remote snapshot and plan the remote calls.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::calendar_event::CalendarEvent;
use crate::diff::{ChangeReason, Operation, OperationKind};
use crate::error::DslError;
use crate::remote::RemoteWorkoutSnapshot;
use crate::sync_window::SyncWindow;
use crate::workout::WorkoutDocument;

/// A calendar event together with its managed name and compiled workout.
#[derive(Debug, Clone, PartialEq)]
pub struct DesiredWorkout {
    pub event: CalendarEvent,
    pub name: String,
    pub compiled: Result<WorkoutDocument, DslError>,
}

impl DesiredWorkout {
    /// Compile the event description. A notation error is kept, not raised,
    /// so one bad event never blocks the rest of the pass.
    pub fn compile(event: CalendarEvent) -> Self {
        let name = event.workout_name();
        let compiled = WorkoutDocument::compile(&name, &event.description);
        DesiredWorkout {
            event,
            name,
            compiled,
        }
    }
}

/// A calendar event whose notation did not compile.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedWorkout {
    pub name: String,
    pub error: DslError,
}

/// Ordered remote calls for one pass.
///
/// Per workout a Delete always precedes its Create, orphan Deletes follow,
/// and every Schedule comes last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationPlan {
    pub operations: Vec<Operation>,
    pub skipped: Vec<SkippedWorkout>,
}

impl OperationPlan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// (creates, deletes, schedules)
    pub fn counts(&self) -> (usize, usize, usize) {
        let mut created = 0;
        let mut deleted = 0;
        let mut scheduled = 0;

        for op in &self.operations {
            match op.kind() {
                OperationKind::Create => created += 1,
                OperationKind::Delete => deleted += 1,
                OperationKind::Schedule => scheduled += 1,
            }
        }

        (created, deleted, scheduled)
    }
}

/// Outcome of comparing one event against the snapshot.
enum Decision {
    InSync,
    Create(ChangeReason),
    Replace { workout_id: i64, reason: ChangeReason },
}

/// Delete (optional), Create and Schedule for one workout name.
struct Chain {
    name: String,
    delete: Option<i64>,
    workout: WorkoutDocument,
    reason: ChangeReason,
    date: NaiveDate,
}

fn decide(event: &CalendarEvent, name: &str, snapshot: &RemoteWorkoutSnapshot, window: &SyncWindow) -> Decision {
    let Some(remote) = snapshot.get(name) else {
        return Decision::Create(ChangeReason::New);
    };
    let workout_id = remote.workout_id;

    let reason = match snapshot.scheduled_date(workout_id) {
        None => ChangeReason::NotScheduled,
        Some(_) if event.is_recently_changed(window) => ChangeReason::RecentlyChanged,
        Some(date) if date != event.start_date() => ChangeReason::Rescheduled { from: date },
        Some(_) => return Decision::InSync,
    };

    Decision::Replace { workout_id, reason }
}

/// Plan the remote calls that bring the account in line with `desired`.
///
/// Pure: the snapshot is the only view of the remote side, and nothing is
/// called here. Events are taken in feed order; when two events share a
/// workout name, the later one's workout and date replace the earlier plan.
pub fn reconcile(desired: &[DesiredWorkout], snapshot: &RemoteWorkoutSnapshot, window: &SyncWindow) -> OperationPlan {
    let mut chains: Vec<Chain> = Vec::new();
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut skipped = Vec::new();

    for desired in desired {
        let name = desired.name.as_str();
        let date = desired.event.start_date();
        // Claimed even when uncompilable, so a typo never deletes a scheduled workout
        claimed.insert(name);

        let workout = match &desired.compiled {
            Ok(workout) => workout,
            Err(error) => {
                tracing::warn!(workout = name, %error, "Skipping event with invalid workout notation");
                skipped.push(SkippedWorkout {
                    name: name.to_string(),
                    error: error.clone(),
                });
                continue;
            }
        };

        if let Some(chain) = chains.iter_mut().find(|c| c.name == name) {
            tracing::debug!(workout = name, %date, "Later event replaces planned workout");
            chain.workout = workout.clone();
            chain.date = date;
            continue;
        }

        match decide(&desired.event, name, snapshot, window) {
            Decision::InSync => {
                tracing::info!(workout = name, %date, "Workout exists and is in sync");
            }
            Decision::Create(reason) => {
                tracing::info!(workout = name, %date, %reason, "Planning workout");
                chains.push(Chain {
                    name: name.to_string(),
                    delete: None,
                    workout: workout.clone(),
                    reason,
                    date,
                });
            }
            Decision::Replace { workout_id, reason } => {
                tracing::info!(workout = name, workout_id, %date, %reason, "Planning workout replacement");
                chains.push(Chain {
                    name: name.to_string(),
                    delete: Some(workout_id),
                    workout: workout.clone(),
                    reason,
                    date,
                });
            }
        }
    }

    let mut operations = Vec::new();
    let mut schedules = Vec::new();

    for chain in chains {
        if let Some(workout_id) = chain.delete {
            operations.push(Operation::Delete {
                name: chain.name.clone(),
                workout_id,
                reason: chain.reason,
            });
        }
        operations.push(Operation::Create {
            name: chain.name.clone(),
            workout: chain.workout,
            reason: chain.reason,
        });
        schedules.push(Operation::Schedule {
            name: chain.name,
            date: chain.date,
        });
    }

    for orphan in snapshot.managed().filter(|w| !claimed.contains(w.workout_name.as_str())) {
        tracing::info!(workout = %orphan.workout_name, workout_id = orphan.workout_id, "Planning removal of orphaned workout");
        operations.push(Operation::Delete {
            name: orphan.workout_name.clone(),
            workout_id: orphan.workout_id,
            reason: ChangeReason::Orphaned,
        });
    }

    operations.extend(schedules);

    OperationPlan { operations, skipped }
}
