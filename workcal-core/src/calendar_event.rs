//! Calendar events extracted from the feed.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::managed_workout_name;
use crate::sync_window::SyncWindow;

/// A planned training session from the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Shortened feed UID (first two characters)
    pub uid: String,
    pub title: String,
    /// Unescaped DESCRIPTION, used as the workout notation source
    pub description: String,
    pub start: EventStart,
    /// LAST-MODIFIED, if the feed carries one
    pub last_modified: Option<NaiveDateTime>,
}

/// DTSTART in either of the two encodings the feed uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStart {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl EventStart {
    pub fn date(&self) -> NaiveDate {
        match self {
            EventStart::Date(d) => *d,
            EventStart::DateTime(dt) => dt.date(),
        }
    }
}

impl CalendarEvent {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn is_in_window(&self, window: &SyncWindow) -> bool {
        window.contains(self.start_date())
    }

    /// True when the calendar entry was edited inside the recent-change window.
    pub fn is_recently_changed(&self, window: &SyncWindow) -> bool {
        self.last_modified.is_some_and(|m| window.is_recent(m))
    }

    /// Name under which this event's workout lives on the remote service.
    pub fn workout_name(&self) -> String {
        managed_workout_name(&self.title, &self.uid)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.start_date().format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn event(last_modified: Option<NaiveDateTime>) -> CalendarEvent {
        CalendarEvent {
            uid: "ab".to_string(),
            title: "Intervals".to_string(),
            description: "* s 1k".to_string(),
            start: EventStart::DateTime(
                NaiveDate::from_ymd_opt(2025, 3, 12)
                    .unwrap()
                    .and_hms_opt(18, 30, 0)
                    .unwrap(),
            ),
            last_modified,
        }
    }

    #[test]
    fn test_workout_name() {
        assert_eq!(event(None).workout_name(), "T | Intervals - ab");
    }

    #[test]
    fn test_recently_changed() {
        let window = SyncWindow::at(
            NaiveDate::from_ymd_opt(2025, 3, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );

        assert!(!event(None).is_recently_changed(&window));
        assert!(event(Some(window.now - Duration::hours(1))).is_recently_changed(&window));
        assert!(!event(Some(window.now - Duration::hours(7))).is_recently_changed(&window));
    }

    #[test]
    fn test_start_date_from_datetime() {
        assert_eq!(
            event(None).start_date(),
            NaiveDate::from_ymd_opt(2025, 3, 12).unwrap()
        );
    }
}
