//! Virtual light panel — holds applied levels and models power draw.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use growbox_app::ports::{LightBank, PowerMeter};
use growbox_domain::actuators::ActuatorState;
use growbox_domain::error::GrowboxError;

/// A simulated four-channel LED panel with an attached power meter.
///
/// Power draw is modeled as `watts_per_unit` times the sum of the applied
/// channel levels — linear enough to exercise the closed-loop controller.
/// The meter can be taken offline to simulate a failed INA-style sensor.
#[derive(Clone)]
pub struct VirtualLightPanel {
    inner: Arc<Inner>,
}

struct Inner {
    watts_per_unit: f64,
    levels: Mutex<ActuatorState>,
    meter_online: AtomicBool,
}

impl VirtualLightPanel {
    /// Create a panel drawing `watts_per_unit` W per channel-level unit.
    #[must_use]
    pub fn new(watts_per_unit: f64) -> Self {
        Self {
            inner: Arc::new(Inner {
                watts_per_unit,
                levels: Mutex::new(ActuatorState::default()),
                meter_online: AtomicBool::new(true),
            }),
        }
    }

    /// The channel levels most recently applied.
    #[must_use]
    pub fn levels(&self) -> ActuatorState {
        self.inner
            .levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The power the panel is drawing right now, per the linear model.
    #[must_use]
    pub fn measured_watts_now(&self) -> f64 {
        f64::from(self.levels().channel_sum()) * self.inner.watts_per_unit
    }

    /// Take the meter offline (or bring it back) to simulate sensor loss.
    pub fn set_meter_online(&self, online: bool) {
        self.inner.meter_online.store(online, Ordering::Relaxed);
    }
}

impl LightBank for VirtualLightPanel {
    async fn apply(&self, state: &ActuatorState) -> Result<(), GrowboxError> {
        *self
            .inner
            .levels
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = state.clone();
        Ok(())
    }
}

impl PowerMeter for VirtualLightPanel {
    async fn measure_watts(&self) -> Option<f64> {
        self.inner
            .meter_online
            .load(Ordering::Relaxed)
            .then(|| self.measured_watts_now())
    }
}
