//! Workout step tree and the distance/duration estimates derived from it.

use std::fmt;

use crate::constants::DEFAULT_PACE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Warmup,
    Interval,
    Recovery,
    Cooldown,
    Repeat,
}

impl StepKind {
    /// Map a notation marker (`w`, `s`, `r`, `c`, `x`) to a step kind.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "w" => Some(StepKind::Warmup),
            "s" => Some(StepKind::Interval),
            "r" => Some(StepKind::Recovery),
            "c" => Some(StepKind::Cooldown),
            "x" => Some(StepKind::Repeat),
            _ => None,
        }
    }

    pub fn type_id(&self) -> u32 {
        match self {
            StepKind::Warmup => 1,
            StepKind::Cooldown => 2,
            StepKind::Interval => 3,
            StepKind::Recovery => 4,
            StepKind::Repeat => 6,
        }
    }

    pub fn type_key(&self) -> &'static str {
        match self {
            StepKind::Warmup => "warmup",
            StepKind::Cooldown => "cooldown",
            StepKind::Interval => "interval",
            StepKind::Recovery => "recovery",
            StepKind::Repeat => "repeat",
        }
    }
}

/// What ends a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCondition {
    LapButton,
    /// Meters
    Distance(u32),
    /// Seconds
    Time(u32),
}

/// A pace in seconds per kilometer, written `mm:ss`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    seconds: u32,
}

impl Pace {
    pub fn from_seconds(seconds: u32) -> Self {
        Pace { seconds }
    }

    /// Parse `mm:ss` with exactly two digits on each side.
    pub fn parse(text: &str) -> Option<Self> {
        parse_clock(text).map(Pace::from_seconds)
    }

    pub fn default_pace() -> Self {
        // DEFAULT_PACE is a well-formed literal
        Pace::parse(DEFAULT_PACE).unwrap_or(Pace { seconds: 335 })
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Speed band in m/s for the remote pace zone: [1000/(s-3), 1000/(s+4)].
    pub fn zone(&self) -> (f64, f64) {
        let s = f64::from(self.seconds);
        (1000.0 / (s - 3.0), 1000.0 / (s + 4.0))
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.seconds / 60, self.seconds % 60)
    }
}

/// Parse `mm:ss` (two digits each) into seconds.
pub(crate) fn parse_clock(text: &str) -> Option<u32> {
    let (minutes, seconds) = text.split_once(':')?;
    if minutes.len() != 2 || seconds.len() != 2 {
        return None;
    }
    if !minutes.bytes().chain(seconds.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(minutes.parse::<u32>().ok()? * 60 + seconds.parse::<u32>().ok()?)
}

/// Intensity target of an executable step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    None,
    HeartRateZone { low: u32, high: u32 },
    PaceZone(Pace),
}

impl Target {
    pub fn type_id(&self) -> u32 {
        match self {
            Target::None => 1,
            Target::HeartRateZone { .. } => 4,
            Target::PaceZone(_) => 6,
        }
    }

    pub fn type_key(&self) -> &'static str {
        match self {
            Target::None => "no.target",
            Target::HeartRateZone { .. } => "heart.rate.zone",
            Target::PaceZone(_) => "pace.zone",
        }
    }

    /// Label shown in step descriptions: heart-rate midpoint or the pace itself.
    pub fn label(&self) -> Option<String> {
        match self {
            Target::None => None,
            Target::HeartRateZone { low, high } => Some(((low + high) / 2).to_string()),
            Target::PaceZone(pace) => Some(pace.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepBody {
    Executable {
        kind: StepKind,
        end_condition: EndCondition,
        target: Target,
    },
    Repeat {
        iterations: u32,
        children: Vec<WorkoutStep>,
    },
}

/// One node of a compiled workout.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutStep {
    /// 1-based position among siblings
    pub order: u32,
    pub description: String,
    /// Repeat group id: set on repeat groups and on their direct children
    pub child_step_id: Option<u32>,
    pub body: StepBody,
}

impl WorkoutStep {
    pub fn executable(order: u32, kind: StepKind, end_condition: EndCondition, target: Target) -> Self {
        WorkoutStep {
            order,
            description: String::new(),
            child_step_id: None,
            body: StepBody::Executable {
                kind,
                end_condition,
                target,
            },
        }
    }

    pub fn repeat(order: u32, iterations: u32, children: Vec<WorkoutStep>) -> Self {
        WorkoutStep {
            order,
            description: String::new(),
            child_step_id: None,
            body: StepBody::Repeat {
                iterations,
                children,
            },
        }
    }

    pub fn kind(&self) -> StepKind {
        match &self.body {
            StepBody::Executable { kind, .. } => *kind,
            StepBody::Repeat { .. } => StepKind::Repeat,
        }
    }

    pub fn target(&self) -> Target {
        match &self.body {
            StepBody::Executable { target, .. } => *target,
            StepBody::Repeat { .. } => Target::None,
        }
    }

    pub fn children(&self) -> &[WorkoutStep] {
        match &self.body {
            StepBody::Executable { .. } => &[],
            StepBody::Repeat { children, .. } => children,
        }
    }

    /// Pace used for estimates: the step's own pace target, else the default.
    fn estimate_pace(&self) -> Pace {
        match self.target() {
            Target::PaceZone(pace) => pace,
            _ => Pace::default_pace(),
        }
    }

    /// Estimated distance in meters.
    pub fn estimated_distance(&self) -> f64 {
        match &self.body {
            StepBody::Executable { end_condition, .. } => match end_condition {
                EndCondition::LapButton => 0.0,
                EndCondition::Distance(meters) => f64::from(*meters),
                EndCondition::Time(seconds) => {
                    f64::from(*seconds) * 1000.0 / f64::from(self.estimate_pace().seconds())
                }
            },
            StepBody::Repeat {
                iterations,
                children,
            } => {
                let pass: f64 = children.iter().map(WorkoutStep::estimated_distance).sum();
                pass * f64::from(*iterations)
            }
        }
    }

    /// Estimated duration in seconds.
    pub fn estimated_duration(&self) -> f64 {
        match &self.body {
            StepBody::Executable { end_condition, .. } => match end_condition {
                EndCondition::LapButton => 0.0,
                EndCondition::Distance(meters) => {
                    f64::from(self.estimate_pace().seconds()) * f64::from(*meters) / 1000.0
                }
                EndCondition::Time(seconds) => f64::from(*seconds),
            },
            StepBody::Repeat {
                iterations,
                children,
            } => {
                let pass: f64 = children.iter().map(WorkoutStep::estimated_duration).sum();
                pass * f64::from(*iterations)
            }
        }
    }
}
