//! Colored terminal rendering for workcal-core types.

use owo_colors::OwoColorize;
use workcal_core::diff::{ApplyStats, Operation, OperationKind, OperationPlan, SkippedWorkout};

pub trait Render {
    fn render(&self) -> String;
}

fn colorize(kind: OperationKind, text: &str) -> String {
    match kind {
        OperationKind::Create => text.green().to_string(),
        OperationKind::Delete => text.red().to_string(),
        OperationKind::Schedule => text.cyan().to_string(),
    }
}

impl Render for OperationKind {
    fn render(&self) -> String {
        colorize(*self, &self.to_string())
    }
}

impl Render for Operation {
    fn render(&self) -> String {
        let kind = self.kind();
        let detail = match self {
            Operation::Delete {
                workout_id, reason, ..
            } => format!("#{workout_id} {reason}"),
            Operation::Create { workout, reason, .. } => format!(
                "{reason}, {:.2} km",
                workout.estimated_distance() / 1000.0
            ),
            Operation::Schedule { date, .. } => date.to_string(),
        };

        format!(
            "{} {} {}",
            kind.render(),
            colorize(kind, self.name()),
            detail.dimmed()
        )
    }
}

impl Render for SkippedWorkout {
    fn render(&self) -> String {
        format!("{} {} {}", "!".yellow(), self.name.yellow(), self.error.to_string().dimmed())
    }
}

impl Render for OperationPlan {
    fn render(&self) -> String {
        let mut lines: Vec<String> = self.skipped.iter().map(|s| format!("   {}", s.render())).collect();

        if self.is_empty() {
            lines.push("   Everything in sync".dimmed().to_string());
        } else {
            lines.extend(self.iter().map(|op| format!("   {}", op.render())));
        }

        lines.join("\n")
    }
}

impl Render for ApplyStats {
    fn render(&self) -> String {
        let summary = format!(
            "{} created, {} deleted, {} scheduled",
            self.created, self.deleted, self.scheduled
        );
        if self.is_clean() {
            summary
        } else {
            format!(
                "{summary}, {}",
                format!("{} failed, {} not attempted", self.failed, self.abandoned).red()
            )
        }
    }
}
