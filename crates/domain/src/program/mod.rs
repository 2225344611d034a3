//! Program — the persisted automation schedule.
//!
//! A program is one baseline [`ActuatorState`] plus an ordered tree of
//! [`Rule`]s. It is loaded once at startup (or on explicit reload), treated
//! as immutable for the duration of a cycle, and borrowed read-only by the
//! engine — evaluation never mutates it.

mod condition;
mod rule;

pub use condition::{Comparison, SensorCondition};
pub use rule::Rule;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::actuators::{ActuatorPatch, ActuatorState};
use crate::error::{ProgramError, RuleIssue};

/// The top-level persisted object: defaults plus the rule tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Baseline actuator state when no rule is active.
    pub default_actions: ActuatorState,
    /// Top-level rules, in evaluation order.
    pub loops: Vec<Rule>,
}

/// A program parsed from a document, plus any rules dropped on the way.
#[derive(Debug)]
pub struct ParsedProgram {
    pub program: Program,
    /// Top-level rules skipped because their JSON matched no variant.
    pub skipped: Vec<SkippedRule>,
}

/// Diagnostic for a rule dropped at the parse boundary.
#[derive(Debug)]
pub struct SkippedRule {
    /// Index of the rule in `settings.loops`.
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct ProgramDocument {
    settings: ProgramSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProgramSettings {
    default_actions: ActuatorState,
    loops: Vec<serde_json::Value>,
}

impl Program {
    /// Parse a program document.
    ///
    /// The outer `settings` object must be well formed; individual rules
    /// whose JSON matches no variant are skipped and reported instead of
    /// failing the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Parse`] when the document is not valid JSON
    /// or the `settings` object is malformed.
    pub fn parse(source: &str) -> Result<ParsedProgram, ProgramError> {
        let doc: ProgramDocument = serde_json::from_str(source)?;
        let mut loops = Vec::with_capacity(doc.settings.loops.len());
        let mut skipped = Vec::new();
        for (index, raw) in doc.settings.loops.into_iter().enumerate() {
            match serde_json::from_value::<Rule>(raw) {
                Ok(rule) => loops.push(rule),
                Err(err) => skipped.push(SkippedRule {
                    index,
                    reason: err.to_string(),
                }),
            }
        }
        Ok(ParsedProgram {
            program: Self {
                default_actions: doc.settings.default_actions,
                loops,
            },
            skipped,
        })
    }

    /// The built-in fallback program: a 07:00–19:00 photoperiod with gentle
    /// airflow around the clock.
    ///
    /// This is what the chamber runs when the persisted document is missing
    /// or corrupt, so it errs on the side of keeping plants alive.
    #[must_use]
    pub fn built_in_default() -> Self {
        Self {
            default_actions: ActuatorState {
                fan: 48,
                ..ActuatorState::default()
            },
            loops: vec![Rule::Time {
                start: "07:00".to_string(),
                end: "19:00".to_string(),
                actions: vec![ActuatorPatch {
                    red: Some(8),
                    green: Some(0),
                    blue: Some(24),
                    white: Some(92),
                    fan: Some(96),
                    target_watts: None,
                }],
                loops: Vec::new(),
            }],
        }
    }

    /// Every sensor name referenced anywhere in the rule tree.
    ///
    /// The cycle driver uses this to know which sensors to snapshot.
    #[must_use]
    pub fn referenced_sensors(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        for rule in &self.loops {
            rule.collect_sensor_names(&mut names);
        }
        names
    }

    /// Structural issues across the whole tree, each with the path of the
    /// offending rule (e.g. `settings.loops[0].loops[1]`).
    #[must_use]
    pub fn structural_issues(&self) -> Vec<(String, RuleIssue)> {
        let mut issues = Vec::new();
        for (index, rule) in self.loops.iter().enumerate() {
            collect_issues(rule, &format!("settings.loops[{index}]"), &mut issues);
        }
        issues
    }
}

fn collect_issues(rule: &Rule, path: &str, out: &mut Vec<(String, RuleIssue)>) {
    if let Err(issue) = rule.validate() {
        out.push((path.to_string(), issue));
    }
    for (index, child) in rule.children().iter().enumerate() {
        collect_issues(child, &format!("{path}.loops[{index}]"), out);
    }
}
