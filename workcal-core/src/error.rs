//! Error types for the workcal ecosystem.

use std::fmt;

use thiserror::Error;

/// Errors that can occur in workcal operations.
#[derive(Error, Debug)]
pub enum WorkCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed parse error: {0}")]
    FeedParse(#[from] FeedParseError),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Calendar fetch error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for workcal operations.
pub type WorkCalResult<T> = Result<T, WorkCalError>;

/// Structural problems in a calendar feed. Any of these discards the whole feed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedParseError {
    #[error("content line contains an unescaped line break: {0:?}")]
    RawLineBreak(String),

    #[error("expected END:{expected}, got END:{found}")]
    MismatchedEnd { expected: String, found: String },

    #[error("missing END:{0}")]
    Unterminated(String),

    #[error("unrecognized date encoding {0:?} (expected 8 or 15 characters)")]
    DateLength(String),

    #[error("invalid date value {0:?}")]
    DateValue(String),

    #[error("event is missing required field {0}")]
    MissingField(&'static str),
}

/// A workout notation line that could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid step syntax on line {line_number} < {line} >: {kind}")]
pub struct DslError {
    /// 1-based line number in the workout source
    pub line_number: usize,
    pub line: String,
    pub kind: DslErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DslErrorKind {
    MissingBullet,
    UnknownMarker(String),
    EndCondition(String),
    Target(String),
    RepeatClause(String),
    PaceTooFast(String),
    /// Repeat requested more children than the source still holds
    RepeatOverrun { requested: usize, available: usize },
}

impl fmt::Display for DslErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DslErrorKind::MissingBullet => write!(f, "step lines must start with '* '"),
            DslErrorKind::UnknownMarker(m) => {
                write!(f, "unknown step marker '{m}' (expected w, s, r, c or x)")
            }
            DslErrorKind::EndCondition(t) => write!(
                f,
                "malformed end condition '{t}' (expected <N>k, <N>m or <mm:ss>t)"
            ),
            DslErrorKind::Target(t) => write!(
                f,
                "malformed target '{t}' (expected @<bpm>-<bpm> or @<mm:ss>)"
            ),
            DslErrorKind::RepeatClause(t) => write!(
                f,
                "malformed repeat clause '{t}' (expected <iterations 1-99> <steps 1-9>)"
            ),
            DslErrorKind::PaceTooFast(t) => write!(f, "pace '{t}' is too fast to encode"),
            DslErrorKind::RepeatOverrun {
                requested,
                available,
            } => write!(
                f,
                "repeat needs {requested} steps but only {available} remain"
            ),
        }
    }
}
