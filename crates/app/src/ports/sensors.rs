//! Sensor port — per-cycle snapshot readings.

use std::future::Future;

/// Read access to the chamber's environmental sensors.
///
/// A reading of `None` means the sensor is unavailable right now (not wired,
/// warming up, or faulted). Dependent rules fail closed on absent readings;
/// unavailability is never an error.
pub trait SensorReader {
    /// Read the named sensor once.
    fn read_sensor(&self, name: &str) -> impl Future<Output = Option<f64>> + Send;
}
