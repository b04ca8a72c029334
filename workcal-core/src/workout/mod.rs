//! Workout notation compiler.
//!
//! Turns the text of a calendar event into a [`WorkoutDocument`]: a step
//! tree with distance/duration estimates and generated step descriptions,
//! ready to be serialised into the remote workout-service payload.

mod compile;
mod dsl;
pub mod payload;
pub mod step;

use crate::error::DslError;
use compile::{CompileContext, assign_child_step_ids, describe_steps, summary_line};
pub use payload::WorkoutPayload;
pub use step::{EndCondition, Pace, StepBody, StepKind, Target, WorkoutStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SportType {
    Running,
}

impl SportType {
    pub fn type_id(&self) -> u32 {
        match self {
            SportType::Running => 1,
        }
    }

    pub fn type_key(&self) -> &'static str {
        match self {
            SportType::Running => "running",
        }
    }
}

/// A compiled workout, shaped like the remote service's workout document.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDocument {
    pub name: String,
    /// The notation source, verbatim
    pub description: String,
    pub sport_type: SportType,
    pub steps: Vec<WorkoutStep>,
    pub remote_id: Option<i64>,
    pub owner_id: Option<i64>,
}

impl WorkoutDocument {
    /// Compile notation `source` into a document called `name`.
    ///
    /// Pure: any malformed line fails the whole document.
    pub fn compile(name: &str, source: &str) -> Result<Self, DslError> {
        let mut steps = dsl::parse_steps(source)?;

        let mut ctx = CompileContext::new(steps.len());
        assign_child_step_ids(&mut steps, &mut ctx);
        describe_steps(&mut steps, &ctx);

        let distance: f64 = steps.iter().map(WorkoutStep::estimated_distance).sum();
        let duration: f64 = steps.iter().map(WorkoutStep::estimated_duration).sum();
        if let Some(first) = steps.first_mut() {
            first.description = summary_line(distance, duration);
        }

        Ok(WorkoutDocument {
            name: name.to_string(),
            description: source.to_string(),
            sport_type: SportType::Running,
            steps,
            remote_id: None,
            owner_id: None,
        })
    }

    /// Total estimated distance in meters.
    pub fn estimated_distance(&self) -> f64 {
        self.steps.iter().map(WorkoutStep::estimated_distance).sum()
    }

    /// Total estimated duration in seconds.
    pub fn estimated_duration(&self) -> f64 {
        self.steps.iter().map(WorkoutStep::estimated_duration).sum()
    }

    pub fn to_payload(&self) -> WorkoutPayload {
        WorkoutPayload::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DslErrorKind;

    const INTERVALS: &str = "* w 1k\n* x 3 2\n* s 400m @04:00\n* r 200m";

    #[test]
    fn test_compile_interval_session() {
        let doc = WorkoutDocument::compile("Track", INTERVALS).unwrap();

        assert_eq!(doc.name, "Track");
        assert_eq!(doc.description, INTERVALS);
        assert_eq!(doc.steps.len(), 2);

        assert_eq!(
            doc.steps[0].body,
            StepBody::Executable {
                kind: StepKind::Warmup,
                end_condition: EndCondition::Distance(1000),
                target: Target::None
            }
        );
        match &doc.steps[1].body {
            StepBody::Repeat {
                iterations,
                children,
            } => {
                assert_eq!(*iterations, 3);
                assert_eq!(
                    children[0].body,
                    StepBody::Executable {
                        kind: StepKind::Interval,
                        end_condition: EndCondition::Distance(400),
                        target: Target::PaceZone(Pace::from_seconds(240))
                    }
                );
                assert_eq!(
                    children[1].body,
                    StepBody::Executable {
                        kind: StepKind::Recovery,
                        end_condition: EndCondition::Distance(200),
                        target: Target::None
                    }
                );
            }
            other => panic!("Expected repeat, got {:?}", other),
        }

        assert_eq!(doc.estimated_distance(), 2800.0);
        // 335 + 3 * (96 + 67)
        assert_eq!(doc.estimated_duration(), 824.0);
    }

    #[test]
    fn test_first_step_carries_summary() {
        let doc = WorkoutDocument::compile("Track", INTERVALS).unwrap();
        assert_eq!(doc.steps[0].description, "2.80 km - 14 min");
        // Last top-level step (the repeat) is unlabeled, its children are
        assert_eq!(doc.steps[1].description, "");
        assert_eq!(doc.steps[1].children()[0].description, "1 / 2 (04:00)");
        assert_eq!(doc.steps[1].children()[1].description, "2 / 2");
    }

    #[test]
    fn test_single_step_round_trip_estimate() {
        let doc = WorkoutDocument::compile("Tempo", "* s 5k @04:30").unwrap();
        assert_eq!(doc.estimated_distance(), 5000.0);
        assert_eq!(doc.estimated_duration(), 270.0 * 5.0);
    }

    #[test]
    fn test_empty_source_compiles_to_no_steps() {
        let doc = WorkoutDocument::compile("Rest", "").unwrap();
        assert!(doc.steps.is_empty());
        assert_eq!(doc.estimated_distance(), 0.0);
    }

    #[test]
    fn test_malformed_line_fails_document() {
        let err = WorkoutDocument::compile("Bad", "* w 1k\n* s 1.5k").unwrap_err();
        assert_eq!(err.line_number, 2);
        assert_eq!(err.kind, DslErrorKind::EndCondition("1.5k".to_string()));
    }
}
