//! In-memory gateway that records every call, for tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use chrono::{Datelike, NaiveDate};

use crate::error::{WorkCalError, WorkCalResult};
use crate::remote::{RemoteWorkout, ScheduleDocument, ScheduleItem, WorkoutGateway};
use crate::workout::WorkoutDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(String),
    Delete(i64),
    Schedule(i64, NaiveDate),
}

#[derive(Debug, Default)]
struct State {
    workouts: Vec<RemoteWorkout>,
    schedule: BTreeMap<(i32, u32), Vec<ScheduleItem>>,
    created: i64,
    calls: Vec<Call>,
    schedule_requests: Vec<(i32, u32)>,
    fail_create: HashSet<String>,
    fail_delete: HashSet<i64>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryGateway {
    state: Mutex<State>,
}

impl MemoryGateway {
    fn state(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn insert_workout(&self, workout: RemoteWorkout) {
        self.state().workouts.push(workout);
    }

    pub fn insert_schedule(&self, year: i32, month: u32, item: ScheduleItem) {
        self.state().schedule.entry((year, month)).or_default().push(item);
    }

    pub fn fail_create(&self, name: &str) {
        self.state().fail_create.insert(name.to_string());
    }

    pub fn fail_delete(&self, workout_id: i64) {
        self.state().fail_delete.insert(workout_id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn schedule_requests(&self) -> Vec<(i32, u32)> {
        self.state().schedule_requests.clone()
    }

    pub fn workout_names(&self) -> Vec<String> {
        self.state().workouts.iter().map(|w| w.workout_name.clone()).collect()
    }
}

impl WorkoutGateway for MemoryGateway {
    async fn list_workouts(&self) -> WorkCalResult<Vec<RemoteWorkout>> {
        Ok(self.state().workouts.clone())
    }

    async fn get_schedule(&self, year: i32, month: u32) -> WorkCalResult<ScheduleDocument> {
        let mut state = self.state();
        state.schedule_requests.push((year, month));
        Ok(ScheduleDocument {
            calendar_items: state.schedule.get(&(year, month)).cloned().unwrap_or_default(),
        })
    }

    async fn create_workout(&self, workout: &WorkoutDocument) -> WorkCalResult<RemoteWorkout> {
        let mut state = self.state();
        state.calls.push(Call::Create(workout.name.clone()));
        if state.fail_create.contains(&workout.name) {
            return Err(WorkCalError::Gateway(format!("create {} refused", workout.name)));
        }

        state.created += 1;
        let created = RemoteWorkout::new(1000 + state.created, workout.name.clone());
        state.workouts.push(created.clone());
        Ok(created)
    }

    async fn delete_workout(&self, workout_id: i64) -> WorkCalResult<()> {
        let mut state = self.state();
        state.calls.push(Call::Delete(workout_id));
        if state.fail_delete.contains(&workout_id) {
            return Err(WorkCalError::Gateway(format!("delete {workout_id} refused")));
        }

        state.workouts.retain(|w| w.workout_id != workout_id);
        for items in state.schedule.values_mut() {
            items.retain(|item| item.workout_id != Some(workout_id));
        }
        Ok(())
    }

    async fn schedule_workout(&self, workout_id: i64, date: NaiveDate) -> WorkCalResult<()> {
        let mut state = self.state();
        state.calls.push(Call::Schedule(workout_id, date));
        state
            .schedule
            .entry((date.year(), date.month()))
            .or_default()
            .push(ScheduleItem::workout(workout_id, date));
        Ok(())
    }
}
