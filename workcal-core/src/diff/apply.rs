//! Execute an operation plan against a gateway.

use std::collections::{HashMap, HashSet};

use crate::diff::{Operation, OperationPlan};
use crate::remote::WorkoutGateway;

/// Counts of what a pass actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyStats {
    pub created: usize,
    pub deleted: usize,
    pub scheduled: usize,
    pub failed: usize,
    /// Operations not attempted because an earlier step for the same workout failed
    pub abandoned: usize,
}

impl ApplyStats {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.abandoned == 0
    }
}

/// Run every operation in order.
///
/// A failing call is logged and ends the chain of its workout name; the
/// rest of the plan still runs. The next pass picks up whatever was left.
pub async fn apply<G: WorkoutGateway>(plan: &OperationPlan, gateway: &G) -> ApplyStats {
    let mut stats = ApplyStats::default();
    let mut failed: HashSet<&str> = HashSet::new();
    let mut created_ids: HashMap<&str, i64> = HashMap::new();

    for op in plan.iter() {
        let name = op.name();
        if failed.contains(name) {
            tracing::debug!(workout = name, "Skipping {} after earlier failure", op.kind());
            stats.abandoned += 1;
            continue;
        }

        let result = match op {
            Operation::Delete { workout_id, reason, .. } => {
                tracing::info!(workout = name, workout_id, %reason, "Deleting workout");
                gateway.delete_workout(*workout_id).await.map(|_| stats.deleted += 1)
            }
            Operation::Create { workout, .. } => {
                tracing::info!(workout = name, "Creating workout");
                gateway.create_workout(workout).await.map(|created| {
                    created_ids.insert(name, created.workout_id);
                    stats.created += 1;
                })
            }
            Operation::Schedule { date, .. } => {
                let Some(&workout_id) = created_ids.get(name) else {
                    tracing::warn!(workout = name, "No created workout to schedule");
                    stats.abandoned += 1;
                    continue;
                };
                tracing::info!(workout = name, workout_id, %date, "Scheduling workout");
                gateway
                    .schedule_workout(workout_id, *date)
                    .await
                    .map(|_| stats.scheduled += 1)
            }
        };

        if let Err(error) = result {
            tracing::error!(workout = name, %error, "{} failed", op.kind());
            stats.failed += 1;
            failed.insert(name);
        }
    }

    tracing::info!(
        created = stats.created,
        deleted = stats.deleted,
        scheduled = stats.scheduled,
        failed = stats.failed,
        "Applied plan"
    );

    stats
}
