use anyhow::Result;
use owo_colors::OwoColorize;
use workcal_core::SyncWindow;
use workcal_core::config::WorkCalConfig;

use crate::render::Render;

pub async fn run(config: &WorkCalConfig) -> Result<()> {
    let window = SyncWindow::now();
    let (_, plan) = super::sync::plan(config, &window).await?;

    println!("{} {} to {}", "Sync window".bold(), window.today, window.last_day());
    println!("{}", plan.render());

    let (created, deleted, scheduled) = plan.counts();
    if !plan.is_empty() {
        println!(
            "\nPending: {} to create, {} to delete, {} to schedule",
            created, deleted, scheduled
        );
    }

    Ok(())
}
