//! Power meter port — measured light-panel wattage.

use std::future::Future;

/// Measures the light panel's present power draw.
pub trait PowerMeter {
    /// Take one measurement.
    ///
    /// `None` means the meter is unavailable; the power controller then
    /// falls back to raw channel values instead of erroring.
    fn measure_watts(&self) -> impl Future<Output = Option<f64>> + Send;
}
