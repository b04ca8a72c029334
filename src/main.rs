mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use workcal_core::config::WorkCalConfig;

#[derive(Parser)]
#[command(name = "workcal")]
#[command(about = "Turn training sessions in a calendar feed into scheduled Garmin workouts")]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Less log output (-q warnings only, -qq errors only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Calendar feed selection, overriding the config file.
#[derive(Args)]
struct CalendarArgs {
    /// Google calendar id
    #[arg(long)]
    id: Option<String>,

    /// Google calendar feed name
    #[arg(long)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync the next week of calendar workouts to Garmin Connect
    Sync {
        #[command(flatten)]
        calendar: CalendarArgs,

        /// Print the plan without changing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show what a sync would change
    Status {
        #[command(flatten)]
        calendar: CalendarArgs,
    },
    /// Compile a workout notation file and print the workout JSON
    Dry {
        file: PathBuf,

        /// Workout name to put in the document
        #[arg(long, default_value = "test_workout")]
        name: String,
    },
    /// Write a default config file
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::logging::init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Sync { calendar, dry_run } => {
            let config = load_config(calendar)?;
            commands::sync::run(&config, dry_run).await
        }
        Commands::Status { calendar } => {
            let config = load_config(calendar)?;
            commands::status::run(&config).await
        }
        Commands::Dry { file, name } => commands::dry::run(&file, &name),
        Commands::Init => commands::init::run(),
    }
}

fn load_config(calendar: CalendarArgs) -> Result<WorkCalConfig> {
    let config = WorkCalConfig::load()?.with_calendar(calendar.id, calendar.name);

    if config.garmin.session_cookie.is_none() && config.garmin.bearer_token.is_none() {
        anyhow::bail!(
            "No Garmin credentials configured.\n\n\
            Create a config file with:\n  \
            workcal init\n\n\
            then set garmin.session_cookie or garmin.bearer_token in {}",
            WorkCalConfig::config_path()?.display()
        );
    }

    Ok(config)
}
