use anyhow::Result;
use owo_colors::OwoColorize;
use workcal_core::SyncWindow;
use workcal_core::config::WorkCalConfig;
use workcal_core::diff::{OperationPlan, apply};
use workcal_core::remote::GarminGateway;
use workcal_core::sync::plan_pass;

use crate::render::Render;
use crate::utils::tui::create_spinner;

/// Fetch the feed and the remote account, and plan the pass.
pub async fn plan(config: &WorkCalConfig, window: &SyncWindow) -> Result<(GarminGateway, OperationPlan)> {
    let feed = config.calendar.feed_source()?;
    let gateway = GarminGateway::new(&config.garmin)?;

    let spinner = create_spinner("Fetching calendar".to_string());
    let text = feed.fetch_text().await;
    spinner.finish_and_clear();
    let text = text?;

    let spinner = create_spinner("Reading Garmin workouts".to_string());
    let plan = plan_pass(&text, &gateway, window).await;
    spinner.finish_and_clear();

    Ok((gateway, plan?))
}

pub async fn run(config: &WorkCalConfig, dry_run: bool) -> Result<()> {
    let window = SyncWindow::now();
    let (gateway, plan) = plan(config, &window).await?;

    println!("{} {} to {}", "Sync window".bold(), window.today, window.last_day());
    println!("{}", plan.render());

    if dry_run || plan.is_empty() {
        return Ok(());
    }

    let spinner = create_spinner("Applying".to_string());
    let stats = apply(&plan, &gateway).await;
    spinner.finish_and_clear();

    println!("\nSynced: {}", stats.render());

    if !stats.is_clean() {
        anyhow::bail!("Some operations failed; the next sync will retry them");
    }

    Ok(())
}
