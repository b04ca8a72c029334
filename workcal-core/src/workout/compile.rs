//! Post-parse passes: repeat group ids, step descriptions and the summary line.

use crate::workout::step::{StepBody, WorkoutStep};

/// Counters threaded through one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CompileContext {
    /// Next repeat group id; starts at 1, one per group in document order
    pub next_child_step_id: u32,
    /// Number of top-level steps
    pub total_steps: usize,
}

impl CompileContext {
    pub fn new(total_steps: usize) -> Self {
        CompileContext {
            next_child_step_id: 1,
            total_steps,
        }
    }

    fn take_child_step_id(&mut self) -> u32 {
        let id = self.next_child_step_id;
        self.next_child_step_id += 1;
        id
    }
}

/// Assign repeat group ids depth-first. A group and its direct children share an id.
pub(crate) fn assign_child_step_ids(steps: &mut [WorkoutStep], ctx: &mut CompileContext) {
    for step in steps {
        assign_group(step, ctx, None);
    }
}

fn assign_group(step: &mut WorkoutStep, ctx: &mut CompileContext, parent_group: Option<u32>) {
    match &mut step.body {
        StepBody::Executable { .. } => step.child_step_id = parent_group,
        StepBody::Repeat { children, .. } => {
            let id = ctx.take_child_step_id();
            step.child_step_id = Some(id);
            for child in children {
                assign_group(child, ctx, Some(id));
            }
        }
    }
}

/// Label every step `"<position> / <total>"` plus its target, except the
/// last top-level step. Repeat children count within their own group.
pub(crate) fn describe_steps(steps: &mut [WorkoutStep], ctx: &CompileContext) {
    for step in steps.iter_mut() {
        let is_last = step.order as usize == ctx.total_steps;
        describe(step, ctx.total_steps, !is_last);
    }
}

fn describe(step: &mut WorkoutStep, total: usize, labeled: bool) {
    if labeled {
        step.description = match step.target().label() {
            Some(target) => format!("{} / {} ({})", step.order, total, target),
            None => format!("{} / {}", step.order, total),
        };
    }

    if let StepBody::Repeat { children, .. } = &mut step.body {
        let group_total = children.len();
        for child in children {
            describe(child, group_total, true);
        }
    }
}

/// Summary written over the first step's description.
pub(crate) fn summary_line(distance_meters: f64, duration_seconds: f64) -> String {
    format!(
        "{:.2} km - {} min",
        distance_meters / 1000.0,
        (duration_seconds / 60.0).round()
    )
}
