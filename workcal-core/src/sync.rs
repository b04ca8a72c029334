//! One sync pass: feed text in, remote calls out.

use crate::diff::{ApplyStats, DesiredWorkout, OperationPlan, apply, reconcile};
use crate::error::WorkCalResult;
use crate::ics::parse_feed;
use crate::remote::{RemoteWorkoutSnapshot, WorkoutGateway};
use crate::sync_window::SyncWindow;

/// Plan a pass from already-fetched feed text.
///
/// A malformed feed fails the whole pass before the remote account is read.
pub async fn plan_pass<G: WorkoutGateway>(
    feed_text: &str,
    gateway: &G,
    window: &SyncWindow,
) -> WorkCalResult<OperationPlan> {
    let events = parse_feed(feed_text, window)?;
    tracing::info!(count = events.len(), last_day = %window.last_day(), "Calendar events in sync window");

    let desired: Vec<DesiredWorkout> = events.into_iter().map(DesiredWorkout::compile).collect();
    let snapshot = RemoteWorkoutSnapshot::fetch(gateway, window).await?;

    Ok(reconcile(&desired, &snapshot, window))
}

/// Plan and apply a full pass.
pub async fn run_pass<G: WorkoutGateway>(
    feed_text: &str,
    gateway: &G,
    window: &SyncWindow,
) -> WorkCalResult<(OperationPlan, ApplyStats)> {
    let plan = plan_pass(feed_text, gateway, window).await?;
    let stats = apply(&plan, gateway).await;
    Ok((plan, stats))
}
