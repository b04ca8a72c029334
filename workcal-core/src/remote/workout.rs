use serde::{Deserialize, Serialize};

use crate::constants::MANAGED_NAME_PREFIX;

/// A workout as listed by the remote account.
///
/// Only the identifying fields are typed; the rest of the document is kept
/// untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWorkout {
    pub workout_id: i64,
    pub workout_name: String,
    #[serde(default)]
    pub owner_id: Option<i64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RemoteWorkout {
    pub fn new(workout_id: i64, workout_name: impl Into<String>) -> Self {
        RemoteWorkout {
            workout_id,
            workout_name: workout_name.into(),
            owner_id: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Whether this workout was created by workcal.
    pub fn is_managed(&self) -> bool {
        self.workout_name.starts_with(MANAGED_NAME_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let json = r#"{
            "workoutId": 812,
            "workoutName": "T | Tempo - 4f",
            "ownerId": 99,
            "sportType": {"sportTypeId": 1, "sportTypeKey": "running"},
            "estimatedDistanceInMeters": null
        }"#;
        let workout: RemoteWorkout = serde_json::from_str(json).unwrap();

        assert_eq!(workout.workout_id, 812);
        assert_eq!(workout.owner_id, Some(99));
        assert!(workout.is_managed());
        assert!(workout.extra.contains_key("sportType"));
    }

    #[test]
    fn test_unmanaged_names() {
        assert!(!RemoteWorkout::new(1, "Long run").is_managed());
        assert!(!RemoteWorkout::new(1, "T: something").is_managed());
        assert!(RemoteWorkout::new(1, "T | x - ab").is_managed());
    }
}
