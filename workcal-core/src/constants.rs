use chrono::Duration;

/// Events are synced when they start within [today, today + SYNC_WINDOW_DAYS]
pub const SYNC_WINDOW_DAYS: i64 = 7;

/// Calendar UIDs are shortened to this many characters in workout names
pub const SHORT_UID_LEN: usize = 2;

/// Prefix checked when looking for managed workouts to clean up.
///
/// Generated names start with `"T | "`; the check deliberately keeps the
/// shorter three-character form.
pub const MANAGED_NAME_PREFIX: &str = "T |";

/// Pace used for estimates when a step has no pace target (per km)
pub const DEFAULT_PACE: &str = "05:35";

/// An event edited within this window is re-created even when it looks in sync.
pub fn recent_change_window() -> Duration {
    Duration::hours(5) + Duration::minutes(59) + Duration::seconds(59)
}

/// Build the remote name of a managed workout.
pub fn managed_workout_name(title: &str, short_uid: &str) -> String {
    format!("T | {title} - {short_uid}")
}
