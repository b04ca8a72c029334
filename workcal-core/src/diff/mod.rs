//! Reconciliation between calendar events and remote workouts.

mod apply;
mod operation;
mod operation_kind;
mod plan;

pub use apply::{ApplyStats, apply};
pub use operation::{ChangeReason, Operation};
pub use operation_kind::OperationKind;
pub use plan::{DesiredWorkout, OperationPlan, SkippedWorkout, reconcile};
