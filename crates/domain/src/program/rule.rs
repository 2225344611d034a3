//! Rule — one conditional node in the automation tree.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::actuators::ActuatorPatch;
use crate::context::Context;
use crate::error::RuleIssue;
use crate::time::{in_daily_window, parse_date, parse_time_of_day};

use super::condition::SensorCondition;

/// A node in the automation tree.
///
/// Each variant carries its own condition parameters plus an ordered list of
/// partial actuator overrides (`actions`) and an ordered list of child rules
/// (`loops`). A child is only ever evaluated while its parent's condition
/// holds — nesting is scoping, not decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rule {
    /// Active within a daily window; spans midnight when `start > end`.
    Time {
        /// Window start, `HH:MM` 24-hour format.
        #[serde(default = "default_window_start")]
        start: String,
        /// Window end, `HH:MM` 24-hour format.
        #[serde(default = "default_window_end")]
        end: String,
        #[serde(default)]
        actions: Vec<ActuatorPatch>,
        #[serde(default)]
        loops: Vec<Rule>,
    },
    /// Active from a start date, optionally until an end date.
    DateRange {
        /// First active day, `YYYY-MM-DD`.
        start_date: String,
        /// Last active day (inclusive); `None` leaves the range open-ended.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end_date: Option<String>,
        #[serde(default)]
        actions: Vec<ActuatorPatch>,
        #[serde(default)]
        loops: Vec<Rule>,
    },
    /// Active while a sensor reading satisfies a threshold comparison.
    Sensor {
        /// Threshold condition; a sensor rule without one never activates.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<SensorCondition>,
        #[serde(default)]
        actions: Vec<ActuatorPatch>,
        #[serde(default)]
        loops: Vec<Rule>,
    },
}

fn default_window_start() -> String {
    "00:00".to_string()
}

fn default_window_end() -> String {
    "23:59".to_string()
}

impl Rule {
    /// The rule's own overrides, in application order.
    #[must_use]
    pub fn actions(&self) -> &[ActuatorPatch] {
        match self {
            Self::Time { actions, .. }
            | Self::DateRange { actions, .. }
            | Self::Sensor { actions, .. } => actions,
        }
    }

    /// Child rules, in evaluation order.
    #[must_use]
    pub fn children(&self) -> &[Rule] {
        match self {
            Self::Time { loops, .. }
            | Self::DateRange { loops, .. }
            | Self::Sensor { loops, .. } => loops,
        }
    }

    /// Check structural invariants.
    ///
    /// A failing rule is reported once at load and treated as permanently
    /// inactive by the engine; it is never fatal to a cycle.
    ///
    /// # Errors
    ///
    /// Returns the [`RuleIssue`] that makes this rule unable to activate.
    pub fn validate(&self) -> Result<(), RuleIssue> {
        match self {
            Self::Time { .. } => {}
            Self::DateRange { start_date, .. } => {
                if parse_date(start_date).is_none() {
                    return Err(RuleIssue::UnparsableStartDate(start_date.clone()));
                }
            }
            Self::Sensor { condition, .. } => match condition {
                None => return Err(RuleIssue::MissingCondition),
                Some(c) if c.sensor.is_empty() => return Err(RuleIssue::EmptySensorName),
                Some(_) => {}
            },
        }
        if !self.actions().iter().any(ActuatorPatch::touches_any_field) {
            return Err(RuleIssue::InertActions);
        }
        Ok(())
    }

    /// Whether this rule's own condition holds for the snapshot.
    ///
    /// Pure and total. Structural validity is a separate concern checked by
    /// [`Rule::validate`]; an invalid rule simply evaluates false here.
    #[must_use]
    pub fn condition_holds(&self, ctx: &Context) -> bool {
        match self {
            Self::Time { start, end, .. } => in_daily_window(
                ctx.time_of_day(),
                parse_time_of_day(start),
                parse_time_of_day(end),
            ),
            Self::DateRange {
                start_date,
                end_date,
                ..
            } => {
                let Some(start) = parse_date(start_date) else {
                    return false;
                };
                if ctx.date() < start {
                    return false;
                }
                // An end date that does not parse degrades to "open-ended",
                // matching the field's optionality.
                match end_date.as_deref().and_then(parse_date) {
                    Some(end) => ctx.date() <= end,
                    None => true,
                }
            }
            Self::Sensor { condition, .. } => {
                condition.as_ref().is_some_and(|c| c.holds(ctx))
            }
        }
    }

    pub(crate) fn collect_sensor_names(&self, out: &mut BTreeSet<String>) {
        if let Self::Sensor {
            condition: Some(c), ..
        } = self
        {
            out.insert(c.sensor.clone());
        }
        for child in self.children() {
            child.collect_sensor_names(out);
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time { start, end, .. } => write!(f, "time({start}..{end})"),
            Self::DateRange {
                start_date,
                end_date,
                ..
            } => match end_date {
                Some(end) => write!(f, "date_range({start_date}..{end})"),
                None => write!(f, "date_range({start_date}..)"),
            },
            Self::Sensor { condition, .. } => match condition {
                Some(c) => write!(f, "sensor({c})"),
                None => f.write_str("sensor(?)"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Comparison;
    use chrono::{NaiveDate, NaiveTime};

    fn ctx_at(time: &str) -> Context {
        Context::new(
            parse_time_of_day(time),
            NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        )
    }

    fn lit(red: u16) -> ActuatorPatch {
        ActuatorPatch {
            red: Some(red),
            ..ActuatorPatch::default()
        }
    }

    fn time_rule(start: &str, end: &str) -> Rule {
        Rule::Time {
            start: start.to_string(),
            end: end.to_string(),
            actions: vec![lit(100)],
            loops: Vec::new(),
        }
    }

    #[test]
    fn should_activate_inside_same_day_window() {
        assert!(time_rule("07:00", "19:00").condition_holds(&ctx_at("12:00")));
        assert!(!time_rule("07:00", "19:00").condition_holds(&ctx_at("20:00")));
    }

    #[test]
    fn should_activate_across_midnight_when_window_wraps() {
        let overnight = time_rule("19:00", "07:00");
        assert!(overnight.condition_holds(&ctx_at("23:00")));
        assert!(overnight.condition_holds(&ctx_at("03:00")));
        assert!(!overnight.condition_holds(&ctx_at("12:00")));
    }

    #[test]
    fn should_never_activate_zero_width_window() {
        assert!(!time_rule("12:00", "12:00").condition_holds(&ctx_at("12:00")));
    }

    #[test]
    fn should_treat_unparsable_times_as_midnight() {
        // start falls back to 00:00, so the window is 00:00..19:00.
        let rule = time_rule("dawn", "19:00");
        assert!(rule.condition_holds(&ctx_at("03:00")));
        assert!(!rule.condition_holds(&ctx_at("20:00")));
    }

    fn date_rule(start: &str, end: Option<&str>) -> Rule {
        Rule::DateRange {
            start_date: start.to_string(),
            end_date: end.map(ToString::to_string),
            actions: vec![lit(50)],
            loops: Vec::new(),
        }
    }

    fn ctx_on(date: &str) -> Context {
        Context::new(
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            parse_date(date).unwrap(),
        )
    }

    #[test]
    fn should_activate_open_ended_range_from_start_date_onwards() {
        let rule = date_rule("2024-09-15", None);
        assert!(rule.condition_holds(&ctx_on("2024-09-15")));
        assert!(rule.condition_holds(&ctx_on("2024-12-31")));
        assert!(rule.condition_holds(&ctx_on("2031-01-01")));
        assert!(!rule.condition_holds(&ctx_on("2024-09-14")));
    }

    #[test]
    fn should_activate_single_day_range_on_that_day_only() {
        let rule = date_rule("2024-09-15", Some("2024-09-15"));
        assert!(rule.condition_holds(&ctx_on("2024-09-15")));
        assert!(!rule.condition_holds(&ctx_on("2024-09-16")));
    }

    #[test]
    fn should_respect_inclusive_end_date() {
        let rule = date_rule("2024-09-01", Some("2024-09-30"));
        assert!(rule.condition_holds(&ctx_on("2024-09-30")));
        assert!(!rule.condition_holds(&ctx_on("2024-10-01")));
    }

    #[test]
    fn should_treat_unparsable_end_date_as_open_ended() {
        let rule = date_rule("2024-09-01", Some("whenever"));
        assert!(rule.condition_holds(&ctx_on("2030-01-01")));
    }

    #[test]
    fn should_never_activate_with_unparsable_start_date() {
        let rule = date_rule("soon", None);
        assert!(!rule.condition_holds(&ctx_on("2024-10-01")));
        assert_eq!(
            rule.validate(),
            Err(RuleIssue::UnparsableStartDate("soon".to_string()))
        );
    }

    fn sensor_rule(condition: Option<SensorCondition>) -> Rule {
        Rule::Sensor {
            condition,
            actions: vec![lit(10)],
            loops: Vec::new(),
        }
    }

    #[test]
    fn should_fail_closed_when_sensor_reading_is_absent() {
        let rule = sensor_rule(Some(SensorCondition {
            sensor: "humidity".to_string(),
            comparison: Comparison::Less,
            value: 50.0,
        }));
        assert!(!rule.condition_holds(&ctx_at("12:00")));
    }

    #[test]
    fn should_report_missing_condition_as_structural_issue() {
        assert_eq!(sensor_rule(None).validate(), Err(RuleIssue::MissingCondition));
    }

    #[test]
    fn should_report_empty_sensor_name_as_structural_issue() {
        let rule = sensor_rule(Some(SensorCondition {
            sensor: String::new(),
            comparison: Comparison::Less,
            value: 50.0,
        }));
        assert_eq!(rule.validate(), Err(RuleIssue::EmptySensorName));
    }

    #[test]
    fn should_report_inert_actions_as_structural_issue() {
        let rule = Rule::Time {
            start: "07:00".to_string(),
            end: "19:00".to_string(),
            actions: vec![ActuatorPatch::default()],
            loops: Vec::new(),
        };
        assert_eq!(rule.validate(), Err(RuleIssue::InertActions));
    }

    #[test]
    fn should_deserialize_time_rule_with_default_window() {
        let rule: Rule =
            serde_json::from_str(r#"{"type": "time", "actions": [{"fan": 90}]}"#).unwrap();
        let Rule::Time { start, end, .. } = &rule else {
            panic!("expected a time rule");
        };
        assert_eq!(start, "00:00");
        assert_eq!(end, "23:59");
    }

    #[test]
    fn should_deserialize_nested_rules_from_tagged_json() {
        let json = serde_json::json!({
            "type": "time",
            "start": "07:00",
            "end": "19:00",
            "actions": [{"red": 100, "fan": 90}],
            "loops": [{
                "type": "sensor",
                "condition": {"sensor": "humidity", "comparison": "<", "value": 50},
                "actions": [{"fan": 0}]
            }]
        });
        let rule: Rule = serde_json::from_value(json).unwrap();
        assert_eq!(rule.children().len(), 1);
        assert!(matches!(rule.children()[0], Rule::Sensor { .. }));
    }

    #[test]
    fn should_roundtrip_rules_through_serde_json() {
        let rule = Rule::Sensor {
            condition: Some(SensorCondition {
                sensor: "temperature".to_string(),
                comparison: Comparison::Greater,
                value: 26.0,
            }),
            actions: vec![lit(10)],
            loops: vec![time_rule("19:00", "07:00")],
        };
        let json = serde_json::to_string(&rule).unwrap();
        let parsed: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rule);
    }

    #[test]
    fn should_display_rules_compactly() {
        assert_eq!(time_rule("07:00", "19:00").to_string(), "time(07:00..19:00)");
        assert_eq!(
            date_rule("2024-09-15", None).to_string(),
            "date_range(2024-09-15..)"
        );
        assert_eq!(sensor_rule(None).to_string(), "sensor(?)");
    }

    #[test]
    fn should_collect_sensor_names_recursively() {
        let rule = Rule::Time {
            start: "07:00".to_string(),
            end: "19:00".to_string(),
            actions: vec![lit(1)],
            loops: vec![sensor_rule(Some(SensorCondition {
                sensor: "humidity".to_string(),
                comparison: Comparison::Less,
                value: 50.0,
            }))],
        };
        let mut names = BTreeSet::new();
        rule.collect_sensor_names(&mut names);
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["humidity"]);
    }
}
