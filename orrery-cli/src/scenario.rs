//! Scenario files: initial bodies and parameter settings
//!
//! One declaration per line, `#` starts a comment:
//!
//! ```text
//! set gravity = 1.5
//! preset solar seed 42
//! body 300 at (0, 0, 0)
//! body 6 at (25, 0, 0) vel (0, 0, 21.9)
//! ```
//!
//! Lines are applied in order, so a `set` affects the presets after it.

use glam::DVec3;
use orrery_core::{BodyId, BodySpec, Parameter, Preset, SimError, Simulation};
use std::path::Path;
use thiserror::Error;

/// Scenario error with the 1-based line it came from
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("{message}")]
    Syntax { message: String, line: usize },

    #[error("{source}")]
    Rejected {
        #[source]
        source: SimError,
        line: usize,
    },
}

impl ScenarioError {
    fn syntax(message: impl Into<String>, line: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            line,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Self::Syntax { line, .. } | Self::Rejected { line, .. } => *line,
        }
    }

    /// `path:line: message`, for reporting against a scenario file
    pub fn located(&self, path: &Path) -> String {
        format!("{}:{}: {}", path.display(), self.line(), self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Body(BodySpec),
    Preset { preset: Preset, seed: u64 },
    Set { param: Parameter, value: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scenario {
    /// Declarations paired with their source line
    pub declarations: Vec<(usize, Declaration)>,
}

impl Scenario {
    /// Apply every declaration to `sim` in file order
    pub fn apply(&self, sim: &mut Simulation) -> Result<Vec<BodyId>, ScenarioError> {
        let mut ids = Vec::new();
        for (line, decl) in &self.declarations {
            let line = *line;
            let rejected = |source| ScenarioError::Rejected { source, line };
            match decl {
                Declaration::Body(spec) => ids.push(sim.add_body(*spec).map_err(rejected)?),
                Declaration::Preset { preset, seed } => {
                    ids.extend(sim.load_preset(*preset, *seed).map_err(rejected)?)
                }
                Declaration::Set { param, value } => {
                    sim.set_parameter(*param, *value).map_err(rejected)?
                }
            }
        }
        Ok(ids)
    }

    /// Build a fresh simulation from this scenario
    pub fn build(&self) -> Result<Simulation, ScenarioError> {
        let mut sim = Simulation::new();
        self.apply(&mut sim)?;
        Ok(sim)
    }
}

/// Parse a scenario from source text
pub fn parse_scenario(source: &str) -> Result<Scenario, ScenarioError> {
    let mut scenario = Scenario::default();

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        // Strip trailing comments
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let decl = if let Some(rest) = line.strip_prefix("body ") {
            parse_body(rest, line_no)?
        } else if let Some(rest) = line.strip_prefix("preset ") {
            parse_preset(rest, line_no)?
        } else if let Some(rest) = line.strip_prefix("set ") {
            parse_set(rest, line_no)?
        } else {
            return Err(ScenarioError::syntax(
                format!(
                    "unexpected token: {}",
                    line.split_whitespace().next().unwrap_or("")
                ),
                line_no,
            ));
        };
        scenario.declarations.push((line_no, decl));
    }

    Ok(scenario)
}

/// `body <mass> at (<x>, <y>, <z>) [vel (<vx>, <vy>, <vz>)]`
fn parse_body(rest: &str, line: usize) -> Result<Declaration, ScenarioError> {
    let at_pos = rest
        .find(" at ")
        .ok_or_else(|| ScenarioError::syntax("expected 'at' in body declaration", line))?;
    let mass = parse_number(rest[..at_pos].trim(), "mass", line)?;
    let rest = rest[at_pos + 4..].trim();

    let (position, rest) = parse_vector(rest, "position", line)?;
    let velocity = match rest.trim() {
        "" => DVec3::ZERO,
        tail => {
            let vel = tail
                .strip_prefix("vel")
                .ok_or_else(|| ScenarioError::syntax(format!("unexpected '{tail}'"), line))?;
            let (velocity, trailing) = parse_vector(vel.trim(), "velocity", line)?;
            if !trailing.trim().is_empty() {
                return Err(ScenarioError::syntax(
                    format!("unexpected '{}' after velocity", trailing.trim()),
                    line,
                ));
            }
            velocity
        }
    };

    Ok(Declaration::Body(BodySpec::new(mass, position, velocity)))
}

/// `preset <name> [seed <n>]`
fn parse_preset(rest: &str, line: usize) -> Result<Declaration, ScenarioError> {
    let mut words = rest.split_whitespace();
    let name = words
        .next()
        .ok_or_else(|| ScenarioError::syntax("expected preset name", line))?;
    let preset = name
        .parse::<Preset>()
        .map_err(|e| ScenarioError::syntax(e.to_string(), line))?;

    let seed = match (words.next(), words.next()) {
        (None, _) => 0,
        (Some("seed"), Some(n)) => n
            .parse::<u64>()
            .map_err(|_| ScenarioError::syntax(format!("invalid seed '{n}'"), line))?,
        _ => return Err(ScenarioError::syntax("expected 'seed <n>' after preset name", line)),
    };
    if let Some(extra) = words.next() {
        return Err(ScenarioError::syntax(format!("unexpected '{extra}'"), line));
    }

    Ok(Declaration::Preset { preset, seed })
}

/// `set <parameter> = <value>`
fn parse_set(rest: &str, line: usize) -> Result<Declaration, ScenarioError> {
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| ScenarioError::syntax("expected '=' in set declaration", line))?;
    let param = name
        .trim()
        .parse::<Parameter>()
        .map_err(|e| ScenarioError::syntax(e.to_string(), line))?;
    let value = parse_number(value.trim(), param.name(), line)?;
    Ok(Declaration::Set { param, value })
}

/// Parse `(x, y, z)` at the start of `s`, returning the vector and the rest
fn parse_vector<'a>(
    s: &'a str,
    what: &str,
    line: usize,
) -> Result<(DVec3, &'a str), ScenarioError> {
    let inner = s
        .strip_prefix('(')
        .ok_or_else(|| ScenarioError::syntax(format!("expected '(' in {what}"), line))?;
    let close = inner
        .find(')')
        .ok_or_else(|| ScenarioError::syntax(format!("expected ')' in {what}"), line))?;

    let coords = inner[..close]
        .split(',')
        .map(|c| parse_number(c.trim(), what, line))
        .collect::<Result<Vec<_>, _>>()?;
    if coords.len() != 3 {
        return Err(ScenarioError::syntax(
            format!("expected three coordinates in {what}"),
            line,
        ));
    }

    Ok((DVec3::new(coords[0], coords[1], coords[2]), &inner[close + 1..]))
}

fn parse_number(s: &str, what: &str, line: usize) -> Result<f64, ScenarioError> {
    s.parse::<f64>()
        .map_err(|_| ScenarioError::syntax(format!("invalid number '{s}' for {what}"), line))
}
