//! Configuration for workcal.

mod workcal_config;

pub use workcal_config::{CalendarConfig, GarminConfig, WorkCalConfig};
