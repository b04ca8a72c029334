//! Workout notation lexer and parser.
//!
//! One step per non-empty line:
//!
//! ```text
//! * w 1k              warmup, 1 km
//! * x 3 2             repeat the next 2 steps 3 times
//! * s 400m @04:00     interval, 400 m at 4:00/km
//! * r 02:00t @120-135 recovery, 2 minutes, heart rate 120-135
//! * c                 cooldown, ends on lap button
//! ```

use crate::error::{DslError, DslErrorKind};
use crate::workout::step::{EndCondition, Pace, StepKind, Target, WorkoutStep, parse_clock};

/// A single notation line, before repeat children are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepLine {
    Executable {
        kind: StepKind,
        end_condition: EndCondition,
        target: Target,
    },
    Repeat {
        iterations: u32,
        child_count: usize,
    },
}

/// Parse a whole workout source into its top-level steps.
pub(crate) fn parse_steps(source: &str) -> Result<Vec<WorkoutStep>, DslError> {
    let lines: Vec<(usize, &str)> = source
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect();

    let mut pos = 0;
    let mut steps = Vec::new();
    while pos < lines.len() {
        let order = steps.len() as u32 + 1;
        steps.push(parse_step(&lines, &mut pos, order)?);
    }

    Ok(steps)
}

fn parse_step(lines: &[(usize, &str)], pos: &mut usize, order: u32) -> Result<WorkoutStep, DslError> {
    let (line_number, text) = lines[*pos];
    *pos += 1;

    let error = |kind| DslError {
        line_number,
        line: text.to_string(),
        kind,
    };

    match parse_line(text).map_err(error)? {
        StepLine::Executable {
            kind,
            end_condition,
            target,
        } => Ok(WorkoutStep::executable(order, kind, end_condition, target)),
        StepLine::Repeat {
            iterations,
            child_count,
        } => {
            let mut children = Vec::with_capacity(child_count);
            while children.len() < child_count {
                if *pos >= lines.len() {
                    return Err(error(DslErrorKind::RepeatOverrun {
                        requested: child_count,
                        available: children.len(),
                    }));
                }
                let child_order = children.len() as u32 + 1;
                children.push(parse_step(lines, pos, child_order)?);
            }
            Ok(WorkoutStep::repeat(order, iterations, children))
        }
    }
}

fn parse_line(line: &str) -> Result<StepLine, DslErrorKind> {
    let mut tokens = line.split_whitespace();

    if tokens.next() != Some("*") {
        return Err(DslErrorKind::MissingBullet);
    }

    let marker = tokens.next().unwrap_or("");
    let kind = StepKind::from_marker(marker)
        .ok_or_else(|| DslErrorKind::UnknownMarker(marker.to_string()))?;

    let mut rest = tokens.peekable();

    let step = if kind == StepKind::Repeat {
        let iterations = rest.next().ok_or_else(|| DslErrorKind::RepeatClause(String::new()))?;
        let count = rest
            .next()
            .ok_or_else(|| DslErrorKind::RepeatClause(iterations.to_string()))?;
        let (iterations, child_count) = parse_repeat_clause(iterations, count)?;

        if rest.next_if(|t| t.starts_with('@')).is_some() {
            tracing::debug!(line, "Ignoring target on repeat step");
        }

        StepLine::Repeat {
            iterations,
            child_count,
        }
    } else {
        // A clause that starts like an end condition or target must be well formed
        let end_condition = match rest.next_if(|t| t.starts_with(|c: char| c.is_ascii_digit())) {
            Some(token) => parse_end_condition(token)?,
            None => EndCondition::LapButton,
        };
        let target = match rest.next_if(|t| t.starts_with('@')) {
            Some(token) => parse_target(token)?,
            None => Target::None,
        };

        StepLine::Executable {
            kind,
            end_condition,
            target,
        }
    };

    if rest.peek().is_some() {
        let trailing: Vec<&str> = rest.collect();
        tracing::debug!(line, trailing = %trailing.join(" "), "Ignoring trailing text on step line");
    }

    Ok(step)
}

/// `<iterations 1-99> <child steps 1-9>`
fn parse_repeat_clause(iterations: &str, count: &str) -> Result<(u32, usize), DslErrorKind> {
    let malformed = || DslErrorKind::RepeatClause(format!("{iterations} {count}"));

    let iteration_digits = (1..=2).contains(&iterations.len())
        && iterations.bytes().all(|b| b.is_ascii_digit())
        && !iterations.starts_with('0');
    let single_child_digit = count.len() == 1 && matches!(count.as_bytes()[0], b'1'..=b'9');

    if !iteration_digits || !single_child_digit {
        return Err(malformed());
    }

    let iterations = iterations.parse().map_err(|_| malformed())?;
    let count = count.parse().map_err(|_| malformed())?;
    Ok((iterations, count))
}

/// `<N>k`, `<N>m` or `<mm:ss>t`
fn parse_end_condition(token: &str) -> Result<EndCondition, DslErrorKind> {
    let malformed = || DslErrorKind::EndCondition(token.to_string());

    let Some((value, unit)) = token.split_at_checked(token.len().saturating_sub(1)) else {
        return Err(malformed());
    };

    match unit {
        "k" | "m" => {
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let amount: u32 = value.parse().map_err(|_| malformed())?;
            let meters = if unit == "k" {
                amount.checked_mul(1000).ok_or_else(malformed)?
            } else {
                amount
            };
            Ok(EndCondition::Distance(meters))
        }
        "t" => parse_clock(value).map(EndCondition::Time).ok_or_else(malformed),
        _ => Err(malformed()),
    }
}

/// `@<bpm>-<bpm>` (2-3 digits each) or `@<mm:ss>`
fn parse_target(token: &str) -> Result<Target, DslErrorKind> {
    let malformed = || DslErrorKind::Target(token.to_string());
    let body = token.strip_prefix('@').ok_or_else(malformed)?;

    if let Some((low, high)) = body.split_once('-') {
        let is_bpm = |s: &str| (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit());
        if !is_bpm(low) || !is_bpm(high) {
            return Err(malformed());
        }
        return Ok(Target::HeartRateZone {
            low: low.parse().map_err(|_| malformed())?,
            high: high.parse().map_err(|_| malformed())?,
        });
    }

    let pace = Pace::parse(body).ok_or_else(malformed)?;
    // The zone band divides by (seconds - 3)
    if pace.seconds() <= 3 {
        return Err(DslErrorKind::PaceTooFast(body.to_string()));
    }
    Ok(Target::PaceZone(pace))
}
