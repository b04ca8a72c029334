//! Core of workcal: planned runs in a calendar feed become scheduled Garmin workouts.
//!
//! - `ics` parses the feed into `CalendarEvent`s inside the sync window
//! - `workout` compiles each event's notation into a `WorkoutDocument`
//! - `remote` talks to the workout account and snapshots it
//! - `diff` plans and applies the Create/Delete/Schedule calls
//! - `sync` ties one pass together

pub mod calendar_event;
pub mod config;
pub mod constants;
pub mod diff;
pub mod error;
pub mod ics;
pub mod remote;
pub mod sync;
pub mod sync_window;
pub mod workout;

pub use calendar_event::{CalendarEvent, EventStart};
pub use error::{WorkCalError, WorkCalResult};
pub use sync_window::SyncWindow;
pub use workout::WorkoutDocument;
