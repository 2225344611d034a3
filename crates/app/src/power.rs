//! Closed-loop power controller — drives channel levels to a measured
//! wattage target.
//!
//! Light output varies with panel temperature, supply voltage, and LED
//! aging, so a raw PWM value is a poor proxy for delivered power. When a
//! target carries `target_watts`, the controller applies the requested
//! color ratio, measures, scales all four channels by one factor, and
//! repeats within a small iteration budget. Convergence is not guaranteed
//! (the requested ratio may not reach the target without saturating a
//! channel ceiling); the controller always terminates with the best levels
//! it saw.

use growbox_domain::actuators::{ActuatorState, ChannelLimits, MIN_TARGET_WATTS};
use growbox_domain::error::GrowboxError;

use crate::ports::{LightBank, PowerMeter};

/// Outcome of one power resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerOutcome {
    /// Concrete channel levels to commit (raw PWM-equivalent).
    pub state: ActuatorState,
    /// Whether measured power landed within tolerance of the target.
    pub converged: bool,
}

/// Iterative scaling controller for wattage targets.
#[derive(Debug, Clone)]
pub struct PowerController {
    limits: ChannelLimits,
    tolerance_watts: f64,
    max_iterations: u32,
}

impl Default for PowerController {
    fn default() -> Self {
        Self {
            limits: ChannelLimits::default(),
            tolerance_watts: 0.5,
            max_iterations: 4,
        }
    }
}

impl PowerController {
    /// Create a controller with a custom tolerance and iteration budget.
    #[must_use]
    pub fn new(tolerance_watts: f64, max_iterations: u32) -> Self {
        Self {
            tolerance_watts,
            max_iterations,
            ..Self::default()
        }
    }

    /// Resolve a merged target into concrete channel levels.
    ///
    /// Without a power target, or without a usable meter, the clamped raw
    /// values pass through unchanged — the defined fallback path. A target
    /// below [`MIN_TARGET_WATTS`] is treated as unreliable and also falls
    /// back. Otherwise the controller iterates at most `max_iterations`
    /// times and returns the levels whose measurement came closest to the
    /// target, converged or not; a shortfall is a diagnostic, never an
    /// error.
    ///
    /// The caller must hold exclusive write access to the light channels
    /// for the whole call: every iteration applies candidate levels to the
    /// panel before measuring them.
    ///
    /// # Errors
    ///
    /// Propagates light-bank faults from applying candidate levels.
    pub async fn resolve<L, M>(
        &self,
        target: &ActuatorState,
        lights: &L,
        meter: &M,
    ) -> Result<PowerOutcome, GrowboxError>
    where
        L: LightBank,
        M: PowerMeter,
    {
        let raw = target.clamped(&self.limits);
        let Some(target_watts) = target.target_watts else {
            return Ok(PowerOutcome {
                state: raw,
                converged: false,
            });
        };
        if target_watts < MIN_TARGET_WATTS {
            tracing::warn!(
                target_watts,
                floor = MIN_TARGET_WATTS,
                "power target below reliable floor, driving raw levels"
            );
            return Ok(PowerOutcome {
                state: raw,
                converged: false,
            });
        }

        let mut candidate = raw.clone();
        let mut best = candidate.clone();
        let mut best_error = f64::INFINITY;

        for iteration in 0..self.max_iterations {
            lights.apply(&candidate).await?;
            let Some(measured) = meter.measure_watts().await else {
                tracing::warn!("power meter unavailable, driving raw levels");
                return Ok(PowerOutcome {
                    state: raw,
                    converged: false,
                });
            };

            let error = (measured - target_watts).abs();
            if error < best_error {
                best_error = error;
                best = candidate.clone();
            }
            if error <= self.tolerance_watts {
                tracing::debug!(iteration, measured, target_watts, "power target reached");
                return Ok(PowerOutcome {
                    state: best,
                    converged: true,
                });
            }
            if measured <= 0.0 {
                // A dark panel (or a meter pinned at zero) gives the scale
                // factor nothing to work with.
                break;
            }
            candidate = candidate
                .scale_channels(target_watts / measured)
                .clamped(&self.limits);
        }

        tracing::debug!(
            best_error,
            target_watts,
            "iteration budget exhausted, returning closest levels"
        );
        Ok(PowerOutcome {
            state: best,
            converged: false,
        })
    }
}
