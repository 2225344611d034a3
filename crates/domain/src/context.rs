//! Context — the immutable time/date/sensor snapshot for one cycle.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

/// An immutable snapshot taken once per evaluation cycle.
///
/// Every condition evaluated during a cycle observes exactly this snapshot,
/// so no two rules can see different readings for the same sensor. A sensor
/// absent from the map was unavailable when the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    time_of_day: NaiveTime,
    date: NaiveDate,
    sensors: HashMap<String, f64>,
}

impl Context {
    /// Create a snapshot with no sensor readings.
    #[must_use]
    pub fn new(time_of_day: NaiveTime, date: NaiveDate) -> Self {
        Self {
            time_of_day,
            date,
            sensors: HashMap::new(),
        }
    }

    /// Attach a sensor reading (builder style).
    #[must_use]
    pub fn with_sensor(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert_sensor(name, value);
        self
    }

    /// Record a reading taken while building the snapshot.
    pub fn insert_sensor(&mut self, name: impl Into<String>, value: f64) {
        self.sensors.insert(name.into(), value);
    }

    /// Local wall-clock time of day at snapshot time.
    #[must_use]
    pub fn time_of_day(&self) -> NaiveTime {
        self.time_of_day
    }

    /// Calendar date at snapshot time.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The reading for `name`, if that sensor was available this cycle.
    #[must_use]
    pub fn sensor(&self, name: &str) -> Option<f64> {
        self.sensors.get(name).copied()
    }
}
