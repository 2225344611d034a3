//! Sensor condition — the threshold comparison payload of a sensor rule.

use serde::{Deserialize, Serialize};

use crate::context::Context;

/// Comparison operator between a sensor reading and a threshold.
///
/// Operators arrive as free-form strings in the program document. Anything
/// unrecognized is carried as [`Comparison::Unrecognized`] and never
/// activates, so one typo in a schedule cannot take down automation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Comparison {
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
    Equal,
    /// An operator string this engine does not know.
    Unrecognized(String),
}

impl Comparison {
    /// Evaluate `reading <op> threshold`. Unrecognized operators are false.
    #[must_use]
    pub fn evaluate(&self, reading: f64, threshold: f64) -> bool {
        match self {
            Self::Less => reading < threshold,
            Self::Greater => reading > threshold,
            Self::LessOrEqual => reading <= threshold,
            Self::GreaterOrEqual => reading >= threshold,
            #[allow(clippy::float_cmp)]
            Self::Equal => reading == threshold,
            Self::Unrecognized(_) => false,
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
            Self::Equal => "==",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for Comparison {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "<" => Self::Less,
            ">" => Self::Greater,
            "<=" => Self::LessOrEqual,
            ">=" => Self::GreaterOrEqual,
            "==" => Self::Equal,
            _ => Self::Unrecognized(raw),
        }
    }
}

impl From<Comparison> for String {
    fn from(comparison: Comparison) -> Self {
        comparison.as_str().to_string()
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The condition payload of a sensor rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorCondition {
    /// Sensor name as exposed by the sensor hub, e.g. `"temperature"`.
    pub sensor: String,
    pub comparison: Comparison,
    /// Threshold the reading is compared against.
    pub value: f64,
}

impl SensorCondition {
    /// Whether the condition holds for the given snapshot.
    ///
    /// An absent reading, an unknown sensor name, or an unrecognized
    /// operator all evaluate false (fail-closed) rather than erroring.
    #[must_use]
    pub fn holds(&self, ctx: &Context) -> bool {
        ctx.sensor(&self.sensor)
            .is_some_and(|reading| self.comparison.evaluate(reading, self.value))
    }
}

impl std::fmt::Display for SensorCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.sensor, self.comparison, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn ctx() -> Context {
        Context::new(
            NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            NaiveDate::from_ymd_opt(2024, 9, 15).unwrap(),
        )
    }

    fn condition(comparison: &str, value: f64) -> SensorCondition {
        SensorCondition {
            sensor: "humidity".to_string(),
            comparison: Comparison::from(comparison.to_string()),
            value,
        }
    }

    #[test]
    fn should_evaluate_every_known_operator() {
        assert!(Comparison::Less.evaluate(1.0, 2.0));
        assert!(Comparison::Greater.evaluate(3.0, 2.0));
        assert!(Comparison::LessOrEqual.evaluate(2.0, 2.0));
        assert!(Comparison::GreaterOrEqual.evaluate(2.0, 2.0));
        assert!(Comparison::Equal.evaluate(2.0, 2.0));
        assert!(!Comparison::Less.evaluate(2.0, 2.0));
    }

    #[test]
    fn should_evaluate_unrecognized_operator_as_false() {
        let op = Comparison::from("~=".to_string());
        assert!(matches!(op, Comparison::Unrecognized(_)));
        assert!(!op.evaluate(2.0, 2.0));
    }

    #[test]
    fn should_hold_when_reading_satisfies_threshold() {
        let ctx = ctx().with_sensor("humidity", 42.0);
        assert!(condition("<", 50.0).holds(&ctx));
        assert!(!condition(">", 50.0).holds(&ctx));
    }

    #[test]
    fn should_fail_closed_when_sensor_is_absent() {
        assert!(!condition("<", 50.0).holds(&ctx()));
    }

    #[test]
    fn should_roundtrip_comparison_through_serde_json() {
        for raw in ["<", ">", "<=", ">=", "==", "between"] {
            let json = format!("\"{raw}\"");
            let parsed: Comparison = serde_json::from_str(&json).unwrap();
            assert_eq!(serde_json::to_string(&parsed).unwrap(), json);
        }
    }

    #[test]
    fn should_display_condition_in_infix_form() {
        assert_eq!(condition("<", 50.0).to_string(), "humidity < 50");
    }
}
