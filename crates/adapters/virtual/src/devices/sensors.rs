//! Virtual sensor hub — serves readings from an in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use growbox_app::ports::SensorReader;

/// A simulated sensor hub.
///
/// Readings are set by tests or by a demo task; clearing a reading models a
/// sensor dropping off the bus, which dependent rules must survive.
#[derive(Clone, Default)]
pub struct VirtualSensorHub {
    readings: Arc<Mutex<HashMap<String, f64>>>,
}

impl VirtualSensorHub {
    /// Set or replace a reading.
    pub fn set_reading(&self, name: impl Into<String>, value: f64) {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value);
    }

    /// Remove a reading, simulating an unavailable sensor.
    pub fn clear_reading(&self, name: &str) {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }
}

impl SensorReader for VirtualSensorHub {
    async fn read_sensor(&self, name: &str) -> Option<f64> {
        self.readings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }
}
