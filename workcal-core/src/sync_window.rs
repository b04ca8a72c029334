//! The clock a sync pass runs against.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

use crate::constants::{SYNC_WINDOW_DAYS, recent_change_window};

/// Fixed "today" and "now" for one sync pass.
///
/// Every window and recency decision in a pass is taken against the same
/// instant, so parsing and reconciliation never disagree about the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    pub today: NaiveDate,
    pub now: NaiveDateTime,
}

impl SyncWindow {
    /// Window anchored at the local wall clock.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        SyncWindow {
            today: now.date(),
            now,
        }
    }

    pub fn last_day(&self) -> NaiveDate {
        self.today + Duration::days(SYNC_WINDOW_DAYS)
    }

    /// Both ends are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.today && date <= self.last_day()
    }

    pub fn is_recent(&self, modified: NaiveDateTime) -> bool {
        modified >= self.now - recent_change_window()
    }

    /// Calendar months touched by the window, as (year, month 1-12).
    pub fn months(&self) -> Vec<(i32, u32)> {
        let first = (self.today.year(), self.today.month());
        let last_day = self.last_day();
        let last = (last_day.year(), last_day.month());

        if first == last {
            vec![first]
        } else {
            vec![first, last]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> SyncWindow {
        let now = NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        SyncWindow::at(now)
    }

    #[test]
    fn test_contains_is_inclusive_on_both_ends() {
        let w = window();
        assert!(!w.contains(w.today - Duration::days(1)));
        assert!(w.contains(w.today));
        assert!(w.contains(w.today + Duration::days(7)));
        assert!(!w.contains(w.today + Duration::days(8)));
    }

    #[test]
    fn test_is_recent() {
        let w = window();
        assert!(w.is_recent(w.now - Duration::hours(5)));
        assert!(w.is_recent(w.now - recent_change_window()));
        assert!(!w.is_recent(w.now - Duration::hours(6)));
    }

    #[test]
    fn test_months_spanning_month_end() {
        let w = SyncWindow::at(
            NaiveDate::from_ymd_opt(2025, 12, 28)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        assert_eq!(w.months(), vec![(2025, 12), (2026, 1)]);
        assert_eq!(window().months(), vec![(2025, 3)]);
    }
}
