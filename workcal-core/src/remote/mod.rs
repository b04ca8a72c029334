//! The remote workout account: gateway trait, wire records and the per-pass snapshot.

pub mod feed;
pub mod garmin;
#[cfg(test)]
pub(crate) mod memory;
pub mod schedule;
pub mod snapshot;
pub mod workout;

use chrono::NaiveDate;

use crate::error::WorkCalResult;
use crate::workout::WorkoutDocument;

pub use feed::FeedSource;
pub use garmin::GarminGateway;
pub use schedule::{ScheduleDocument, ScheduleItem};
pub use snapshot::RemoteWorkoutSnapshot;
pub use workout::RemoteWorkout;

/// Operations the sync pass needs from the remote workout account.
///
/// Calls are awaited one at a time; implementations own retries and timeouts.
#[allow(async_fn_in_trait)]
pub trait WorkoutGateway {
    /// Every workout in the account, fully paginated.
    async fn list_workouts(&self) -> WorkCalResult<Vec<RemoteWorkout>>;

    /// Calendar items for one month (`month` is 1-based).
    async fn get_schedule(&self, year: i32, month: u32) -> WorkCalResult<ScheduleDocument>;

    async fn create_workout(&self, workout: &WorkoutDocument) -> WorkCalResult<RemoteWorkout>;

    async fn delete_workout(&self, workout_id: i64) -> WorkCalResult<()>;

    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> WorkCalResult<()>;
}
