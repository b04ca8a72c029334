use anyhow::Result;
use owo_colors::OwoColorize;
use workcal_core::config::WorkCalConfig;

pub fn run() -> Result<()> {
    let path = WorkCalConfig::config_path()?;

    if path.exists() {
        println!("Config already exists at {}", path.display().to_string().dimmed());
        return Ok(());
    }

    WorkCalConfig::create_default_config(&path)?;
    println!("Wrote {}", path.display().to_string().green());
    println!("\nSet your calendar and Garmin session there, then run `workcal status`.");

    Ok(())
}
