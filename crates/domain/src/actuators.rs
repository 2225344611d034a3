//! Actuator state — light channel levels, fan speed, and power targets.
//!
//! The chamber exposes four light drive lines (red, green, blue, white) and
//! one fan line. Rules contribute partial [`ActuatorPatch`] overrides that
//! are folded into a full [`ActuatorState`] with last-writer-wins semantics;
//! the merged result is clamped to the hardware table exactly once before it
//! reaches the drive lines.

use serde::{Deserialize, Serialize};

/// Power targets below this wattage are considered unreliable and ignored.
pub const MIN_TARGET_WATTS: f64 = 2.0;

/// Hardware protection ceilings for each drive line.
///
/// The default table matches the chamber's LED panel and fan. Values above a
/// ceiling are reduced to it, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelLimits {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub white: u16,
    pub fan: u16,
}

impl Default for ChannelLimits {
    fn default() -> Self {
        Self {
            red: 160,
            green: 71,
            blue: 75,
            white: 117,
            fan: 255,
        }
    }
}

/// The controllable quantities of the chamber.
///
/// `target_watts`, when present, instructs the power controller to scale the
/// channel values until measured power matches, instead of driving them raw.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorState {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
    pub white: u16,
    pub fan: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_watts: Option<f64>,
}

impl ActuatorState {
    /// Apply a partial override, returning the merged state.
    ///
    /// Fields set in `patch` replace this state's values; unset fields pass
    /// through unchanged. Folding a sequence of patches left-to-right makes
    /// later patches win per field.
    #[must_use]
    pub fn merge(&self, patch: &ActuatorPatch) -> Self {
        Self {
            red: patch.red.unwrap_or(self.red),
            green: patch.green.unwrap_or(self.green),
            blue: patch.blue.unwrap_or(self.blue),
            white: patch.white.unwrap_or(self.white),
            fan: patch.fan.unwrap_or(self.fan),
            target_watts: patch.target_watts.or(self.target_watts),
        }
    }

    /// Reduce every level to its hardware ceiling. Idempotent.
    #[must_use]
    pub fn clamped(&self, limits: &ChannelLimits) -> Self {
        Self {
            red: self.red.min(limits.red),
            green: self.green.min(limits.green),
            blue: self.blue.min(limits.blue),
            white: self.white.min(limits.white),
            fan: self.fan.min(limits.fan),
            target_watts: self.target_watts,
        }
    }

    /// Scale the four light channels by one factor, rounding to integers.
    ///
    /// Fan and power target pass through; channel ratios are preserved up to
    /// rounding. Levels are not clamped here — the caller decides when.
    #[must_use]
    pub fn scale_channels(&self, factor: f64) -> Self {
        Self {
            red: scale(self.red, factor),
            green: scale(self.green, factor),
            blue: scale(self.blue, factor),
            white: scale(self.white, factor),
            fan: self.fan,
            target_watts: self.target_watts,
        }
    }

    /// Sum of the four light channel levels.
    #[must_use]
    pub fn channel_sum(&self) -> u32 {
        u32::from(self.red) + u32::from(self.green) + u32::from(self.blue) + u32::from(self.white)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(level: u16, factor: f64) -> u16 {
    let scaled = (f64::from(level) * factor).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u16::MAX) {
        u16::MAX
    } else {
        scaled as u16
    }
}

/// A partial actuator override — any subset of fields.
///
/// Unset fields do not participate in merging. The wire shape is flat, e.g.
/// `{"red": 100, "fan": 90}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_watts: Option<f64>,
}

impl ActuatorPatch {
    /// Whether this patch sets at least one field.
    #[must_use]
    pub fn touches_any_field(&self) -> bool {
        self.red.is_some()
            || self.green.is_some()
            || self.blue.is_some()
            || self.white.is_some()
            || self.fan.is_some()
            || self.target_watts.is_some()
    }
}
