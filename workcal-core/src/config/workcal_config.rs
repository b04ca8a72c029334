//! Configuration file at ~/.config/workcal/config.toml

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{WorkCalError, WorkCalResult};
use crate::remote::FeedSource;

static DEFAULT_GARMIN_URL: &str = "https://connect.garmin.com";
const DEFAULT_PAGE_SIZE: u32 = 100;

fn default_base_url() -> String {
    DEFAULT_GARMIN_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct WorkCalConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub garmin: GarminConfig,
}

/// Which calendar feed to read.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CalendarConfig {
    /// Google calendar id (the part before `@group.calendar.google.com`)
    pub id: Option<String>,
    /// Google calendar feed name, e.g. `private-<hash>`
    pub name: Option<String>,
    /// Full feed URL; takes precedence over `id`/`name`
    pub url: Option<String>,
}

/// Garmin Connect access. Credentials come from an existing browser or API session.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GarminConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    pub session_cookie: Option<String>,

    pub bearer_token: Option<String>,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for GarminConfig {
    fn default() -> Self {
        GarminConfig {
            base_url: default_base_url(),
            session_cookie: None,
            bearer_token: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl WorkCalConfig {
    pub fn config_path() -> WorkCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| WorkCalError::Config("Could not determine config directory".into()))?
            .join("workcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the default config file, overridden by `WORKCAL__SECTION__KEY` variables.
    pub fn load() -> WorkCalResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> WorkCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("WORKCAL").separator("__"))
            .build()
            .map_err(|e| WorkCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| WorkCalError::Config(e.to_string()))
    }

    /// Replace the configured calendar with command-line `--id`/`--name`.
    pub fn with_calendar(mut self, id: Option<String>, name: Option<String>) -> Self {
        if id.is_some() || name.is_some() {
            self.calendar = CalendarConfig {
                id: id.or(self.calendar.id),
                name: name.or(self.calendar.name),
                url: None,
            };
        }
        self
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> WorkCalResult<()> {
        let contents = format!(
            "\
# workcal configuration

[calendar]
# Google calendar feed, from its secret iCal address:
# https://calendar.google.com/calendar/ical/<id>@group.calendar.google.com/<name>/basic.ics
# id = \"abcdef0123456789\"
# name = \"private-0123456789abcdef\"

# Or any other iCalendar feed:
# url = \"https://example.com/training.ics\"

[garmin]
# base_url = \"{DEFAULT_GARMIN_URL}\"
# page_size = {DEFAULT_PAGE_SIZE}

# Credentials of an existing Garmin Connect session (one of):
# session_cookie = \"SESSIONID=...\"
# bearer_token = \"...\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;

        Ok(())
    }
}

impl CalendarConfig {
    pub fn feed_source(&self) -> WorkCalResult<FeedSource> {
        if let Some(url) = &self.url {
            return Ok(FeedSource::from_url(url.clone()));
        }

        match (&self.id, &self.name) {
            (Some(id), Some(name)) => Ok(FeedSource::google(id, name)),
            _ => Err(WorkCalError::Config(
                "No calendar configured: set calendar.url, or both calendar.id and calendar.name".into(),
            )),
        }
    }
}
