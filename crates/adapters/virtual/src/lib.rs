//! # growbox-adapter-virtual
//!
//! Virtual/demo chamber adapter that provides simulated hardware for testing
//! and demonstration purposes. Real chambers implement the same ports over
//! PWM drive lines and I2C sensor buses.
//!
//! ## Provided devices
//!
//! | Device | Port(s) | Behaviour |
//! |--------|---------|-----------|
//! | [`VirtualLightPanel`] | `LightBank`, `PowerMeter` | Holds applied channel levels; reports power as a linear function of their sum |
//! | [`VirtualFan`] | `Fan` | Holds the last applied speed |
//! | [`VirtualSensorHub`] | `SensorReader` | Serves readings from an in-memory map |
//!
//! Every device is `Clone` and shares its state through an `Arc`, the same
//! way a connection pool handle would be cloned into each consumer.
//!
//! ## Dependency rule
//!
//! Depends on `growbox-app` (port traits) and `growbox-domain` only.

mod devices;

pub use devices::fan::VirtualFan;
pub use devices::lights::VirtualLightPanel;
pub use devices::sensors::VirtualSensorHub;
