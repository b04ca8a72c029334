//! Wire shape of a workout as the remote workout-service accepts it.

use serde::{Deserialize, Serialize};

use crate::workout::step::{EndCondition, StepBody, Target, WorkoutStep};
use crate::workout::{SportType, WorkoutDocument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPayload {
    pub workout_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub workout_name: String,
    pub description: String,
    pub sport_type: SportTypeDto,
    pub workout_segments: Vec<SegmentDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportTypeDto {
    pub sport_type_id: u32,
    pub sport_type_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDto {
    pub segment_order: u32,
    pub sport_type: SportTypeDto,
    pub workout_steps: Vec<StepDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTypeDto {
    pub step_type_id: u32,
    pub step_type_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndConditionDto {
    pub condition_type_id: u32,
    pub condition_type_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetTypeDto {
    pub workout_target_type_id: u32,
    pub workout_target_type_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepDto {
    #[serde(rename = "ExecutableStepDTO", rename_all = "camelCase")]
    Executable {
        step_order: u32,
        step_type: StepTypeDto,
        child_step_id: Option<u32>,
        description: String,
        end_condition: EndConditionDto,
        end_condition_value: Option<u32>,
        target_type: TargetTypeDto,
        target_value_one: Option<TargetValue>,
        target_value_two: Option<TargetValue>,
    },
    #[serde(rename = "RepeatGroupDTO", rename_all = "camelCase")]
    RepeatGroup {
        step_order: u32,
        step_type: StepTypeDto,
        child_step_id: Option<u32>,
        number_of_iterations: u32,
        smart_repeat: bool,
        workout_steps: Vec<StepDto>,
    },
}

/// Target bounds go out as integers for heart rate and as meters per second for pace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetValue {
    Bpm(u32),
    Speed(f64),
}

impl From<SportType> for SportTypeDto {
    fn from(sport: SportType) -> Self {
        SportTypeDto {
            sport_type_id: sport.type_id(),
            sport_type_key: sport.type_key().to_string(),
        }
    }
}

impl From<&EndCondition> for EndConditionDto {
    fn from(condition: &EndCondition) -> Self {
        let (id, key) = match condition {
            EndCondition::LapButton => (1, "lap.button"),
            EndCondition::Time(_) => (2, "time"),
            EndCondition::Distance(_) => (3, "distance"),
        };
        EndConditionDto {
            condition_type_id: id,
            condition_type_key: key.to_string(),
        }
    }
}

impl From<&WorkoutStep> for StepDto {
    fn from(step: &WorkoutStep) -> Self {
        let kind = step.kind();
        let step_type = StepTypeDto {
            step_type_id: kind.type_id(),
            step_type_key: kind.type_key().to_string(),
        };

        match &step.body {
            StepBody::Executable {
                end_condition,
                target,
                ..
            } => {
                let end_condition_value = match end_condition {
                    EndCondition::LapButton => None,
                    EndCondition::Distance(v) | EndCondition::Time(v) => Some(*v),
                };
                let (target_value_one, target_value_two) = match target {
                    Target::None => (None, None),
                    Target::HeartRateZone { low, high } => {
                        (Some(TargetValue::Bpm(*low)), Some(TargetValue::Bpm(*high)))
                    }
                    Target::PaceZone(pace) => {
                        let (fast, slow) = pace.zone();
                        (Some(TargetValue::Speed(fast)), Some(TargetValue::Speed(slow)))
                    }
                };

                StepDto::Executable {
                    step_order: step.order,
                    step_type,
                    child_step_id: step.child_step_id,
                    description: step.description.clone(),
                    end_condition: end_condition.into(),
                    end_condition_value,
                    target_type: TargetTypeDto {
                        workout_target_type_id: target.type_id(),
                        workout_target_type_key: target.type_key().to_string(),
                    },
                    target_value_one,
                    target_value_two,
                }
            }
            StepBody::Repeat {
                iterations,
                children,
            } => StepDto::RepeatGroup {
                step_order: step.order,
                step_type,
                child_step_id: step.child_step_id,
                number_of_iterations: *iterations,
                smart_repeat: false,
                workout_steps: children.iter().map(StepDto::from).collect(),
            },
        }
    }
}

impl From<&WorkoutDocument> for WorkoutPayload {
    fn from(doc: &WorkoutDocument) -> Self {
        WorkoutPayload {
            workout_id: doc.remote_id,
            owner_id: doc.owner_id,
            workout_name: doc.name.clone(),
            description: doc.description.clone(),
            sport_type: doc.sport_type.into(),
            workout_segments: vec![SegmentDto {
                segment_order: 1,
                sport_type: doc.sport_type.into(),
                workout_steps: doc.steps.iter().map(StepDto::from).collect(),
            }],
        }
    }
}
