//! Point-in-time view of the remote account, read once at the start of a pass.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;

use crate::error::WorkCalResult;
use crate::remote::{RemoteWorkout, WorkoutGateway};
use crate::sync_window::SyncWindow;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteWorkoutSnapshot {
    /// Every listed workout, keyed by name. On duplicate names the last listed wins.
    pub by_name: BTreeMap<String, RemoteWorkout>,
    /// Scheduled date per workout id, restricted to ids present in `by_name`
    pub scheduled: HashMap<i64, NaiveDate>,
}

impl RemoteWorkoutSnapshot {
    /// List all workouts and read the schedule of every month the window touches.
    pub async fn fetch<G: WorkoutGateway>(gateway: &G, window: &SyncWindow) -> WorkCalResult<Self> {
        let workouts = gateway.list_workouts().await?;
        tracing::debug!(count = workouts.len(), "Listed remote workouts");

        let mut scheduled = Vec::new();
        for (year, month) in window.months() {
            let schedule = gateway.get_schedule(year, month).await?;
            scheduled.extend(schedule.workouts());
        }

        Ok(Self::from_parts(workouts, scheduled))
    }

    /// Index raw listings. Scheduled ids with no listed workout are dropped with a warning.
    pub fn from_parts(
        workouts: impl IntoIterator<Item = RemoteWorkout>,
        scheduled: impl IntoIterator<Item = (i64, NaiveDate)>,
    ) -> Self {
        let by_name: BTreeMap<String, RemoteWorkout> = workouts
            .into_iter()
            .map(|w| (w.workout_name.clone(), w))
            .collect();

        let known: HashSet<i64> = by_name.values().map(|w| w.workout_id).collect();

        let mut dates = HashMap::new();
        for (id, date) in scheduled {
            if known.contains(&id) {
                dates.insert(id, date);
            } else {
                tracing::warn!(workout_id = id, %date, "Scheduled workout not found in workout list, ignoring");
            }
        }

        RemoteWorkoutSnapshot {
            by_name,
            scheduled: dates,
        }
    }

    pub fn get(&self, name: &str) -> Option<&RemoteWorkout> {
        self.by_name.get(name)
    }

    pub fn scheduled_date(&self, workout_id: i64) -> Option<NaiveDate> {
        self.scheduled.get(&workout_id).copied()
    }

    /// Workouts carrying the managed-name prefix, in name order.
    pub fn managed(&self) -> impl Iterator<Item = &RemoteWorkout> {
        self.by_name.values().filter(|w| w.is_managed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::memory::MemoryGateway;
    use crate::remote::ScheduleItem;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_unknown_scheduled_ids_are_dropped() {
        let snapshot = RemoteWorkoutSnapshot::from_parts(
            vec![RemoteWorkout::new(1, "T | A - aa"), RemoteWorkout::new(2, "Long run")],
            vec![(1, date(3, 10)), (9, date(3, 11))],
        );

        assert_eq!(snapshot.scheduled_date(1), Some(date(3, 10)));
        assert_eq!(snapshot.scheduled_date(9), None);
        assert_eq!(snapshot.scheduled.len(), 1);
        let managed: Vec<_> = snapshot.managed().map(|w| w.workout_id).collect();
        assert_eq!(managed, vec![1]);
    }

    #[test]
    fn test_duplicate_schedule_last_wins() {
        let snapshot = RemoteWorkoutSnapshot::from_parts(
            vec![RemoteWorkout::new(1, "T | A - aa")],
            vec![(1, date(3, 10)), (1, date(3, 12))],
        );
        assert_eq!(snapshot.scheduled_date(1), Some(date(3, 12)));
    }

    #[tokio::test]
    async fn test_fetch_reads_every_month_in_window() {
        let gateway = MemoryGateway::default();
        gateway.insert_workout(RemoteWorkout::new(1, "T | A - aa"));
        gateway.insert_workout(RemoteWorkout::new(2, "T | B - bb"));
        gateway.insert_schedule(2025, 3, ScheduleItem::workout(1, date(3, 30)));
        gateway.insert_schedule(2025, 4, ScheduleItem::workout(2, date(4, 2)));

        let now = date(3, 28).and_hms_opt(8, 0, 0).unwrap();
        let snapshot = RemoteWorkoutSnapshot::fetch(&gateway, &SyncWindow::at(now))
            .await
            .unwrap();

        assert_eq!(snapshot.by_name.len(), 2);
        assert_eq!(snapshot.scheduled_date(1), Some(date(3, 30)));
        assert_eq!(snapshot.scheduled_date(2), Some(date(4, 2)));
        assert_eq!(gateway.schedule_requests(), vec![(2025, 3), (2025, 4)]);
    }
}
