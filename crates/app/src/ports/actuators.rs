//! Actuator ports — the light panel and circulation fan drive lines.

use std::future::Future;

use growbox_domain::actuators::ActuatorState;
use growbox_domain::error::GrowboxError;

/// The four-channel LED panel.
pub trait LightBank {
    /// Drive the four light channels to the state's levels.
    ///
    /// Only the channel fields of `state` matter here; fan and power target
    /// are ignored.
    fn apply(&self, state: &ActuatorState) -> impl Future<Output = Result<(), GrowboxError>> + Send;
}

/// The circulation fan.
pub trait Fan {
    /// Drive the fan to `speed` (0–255).
    fn set_speed(&self, speed: u16) -> impl Future<Output = Result<(), GrowboxError>> + Send;
}
