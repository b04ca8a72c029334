use std::path::Path;

use anyhow::{Context, Result};
use workcal_core::WorkoutDocument;

pub fn run(file: &Path, name: &str) -> Result<()> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read workout file {}", file.display()))?;

    let workout = WorkoutDocument::compile(name, &source)?;
    tracing::info!(
        workout = name,
        distance_m = workout.estimated_distance(),
        duration_s = workout.estimated_duration(),
        "Compiled workout"
    );

    println!("{}", serde_json::to_string_pretty(&workout.to_payload())?);

    Ok(())
}
