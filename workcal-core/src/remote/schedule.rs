use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One month of the remote calendar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    #[serde(default)]
    pub calendar_items: Vec<ScheduleItem>,
}

/// A calendar entry. Activities, notes and other item types share this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    #[serde(default)]
    pub item_type: String,
    #[serde(default)]
    pub workout_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl ScheduleItem {
    pub fn workout(workout_id: i64, date: NaiveDate) -> Self {
        ScheduleItem {
            item_type: "workout".to_string(),
            workout_id: Some(workout_id),
            date: Some(date.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn is_workout(&self) -> bool {
        self.item_type.eq_ignore_ascii_case("workout")
    }
}

impl ScheduleDocument {
    /// `(workout id, date)` for every scheduled workout. Items without an id
    /// or with an unreadable date are skipped.
    pub fn workouts(&self) -> impl Iterator<Item = (i64, NaiveDate)> + '_ {
        self.calendar_items
            .iter()
            .filter(|item| item.is_workout())
            .filter_map(|item| {
                let id = item.workout_id?;
                let raw = item.date.as_deref()?;
                match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => Some((id, date)),
                    Err(_) => {
                        tracing::warn!(workout_id = id, date = raw, "Ignoring schedule item with unreadable date");
                        None
                    }
                }
            })
    }
}
